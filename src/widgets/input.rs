//! Text input widget.

use crate::dom::ElementId;
use crate::element::style::StyleSpec;
use crate::element::{ElementMut, ElementSpec};
use crate::error::{Result, UiError};
use crate::event::{Endpoint, Event};
use crate::frame::Frame;

pub const INPUT_STYLE: StyleSpec =
    StyleSpec::sized("input input-bordered w-full max-w-xs", "input-{size}");

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// An `<input>` whose value is posted under `name`.
pub struct Input<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Input);

impl<'f> Input<'f> {
    pub fn new(frame: &'f mut Frame, name: &str) -> Self {
        let spec = ElementSpec::new("input")
            .style(INPUT_STYLE)
            .attr("name", name)
            .attr("autocomplete", "off");
        Self {
            inner: frame.create(spec),
        }
    }

    pub fn placeholder(&mut self, text: &str) -> &mut Self {
        self.inner.attr("placeholder", text);
        self
    }

    /// Post to `endpoint` as the user types.
    pub fn on_change(&mut self, endpoint: impl Into<Endpoint>) -> &mut Self {
        self.inner.on(Event::input(endpoint));
        self
    }

    /// Wrap the input in a floating label showing its placeholder.
    ///
    /// The label takes the input's place under the current cursor and the
    /// input moves inside it. Returns the label.
    pub fn floating_label(mut self) -> Result<ElementId> {
        let input = self.inner.id();
        let placeholder = self
            .inner
            .data()
            .and_then(|data| data.attributes().text("placeholder"))
            .map(str::to_owned)
            .ok_or_else(|| {
                UiError::InvalidArgument("a floating label needs a placeholder".to_owned())
            })?;

        let frame = self.inner.frame();
        let label = frame.element("label").classes("floating-label").id();
        frame.within(label, |frame| {
            frame.text("span", &placeholder);
        })?;
        frame.adopt(input, label)?;
        Ok(label)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
