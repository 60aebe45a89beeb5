//! Button widget: a clickable button posting to an endpoint.

use crate::element::style::StyleSpec;
use crate::element::{ElementMut, ElementSpec};
use crate::event::{Endpoint, Event};
use crate::frame::Frame;

/// Base classes and size template of buttons.
pub const BUTTON_STYLE: StyleSpec =
    StyleSpec::sized("btn btn-neutral place-content-center", "btn-{size}");

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A `<button>` with a text label.
///
/// # Examples
///
/// ```ignore
/// Button::new(frame, "Save")
///     .on_click("/orders/save")
///     .size(Size::Sm);
/// ```
pub struct Button<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Button);

impl<'f> Button<'f> {
    pub fn new(frame: &'f mut Frame, label: &str) -> Self {
        let spec = ElementSpec::new("button").content(label).style(BUTTON_STYLE);
        Self {
            inner: frame.create(spec),
        }
    }

    /// Post to `endpoint` on click, swapping the button itself by default.
    pub fn on_click(&mut self, endpoint: impl Into<Endpoint>) -> &mut Self {
        self.inner.on(Event::click(endpoint));
        self
    }

    /// Mark the button disabled.
    pub fn disabled(&mut self) -> &mut Self {
        self.inner.flag("disabled");
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
