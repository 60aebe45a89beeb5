//! Loading indicator shown while tracked elements have a request in flight.

use std::fmt;

use crate::dom::ElementId;
use crate::element::style::{Size, StyleSpec};
use crate::element::{ElementMut, ElementSpec};
use crate::error::{Result, UiError};
use crate::frame::Frame;

const SPINNER_STYLE: StyleSpec = StyleSpec::sized("loading", "loading-{size}");

/// Animation of a [`Spinner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerKind {
    Spinner,
    Dots,
    Ring,
    Ball,
    Bars,
    #[default]
    Infinity,
}

impl SpinnerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spinner => "spinner",
            Self::Dots => "dots",
            Self::Ring => "ring",
            Self::Ball => "ball",
            Self::Bars => "bars",
            Self::Infinity => "infinity",
        }
    }
}

impl fmt::Display for SpinnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// A `<span>` spinner.
///
/// Every tracked element gets `hx-indicator` pointing at the spinner, and
/// the spinner is hidden until one of them makes a request.
///
/// ```ignore
/// let button = Button::new(frame, "Save").on_click("/save").id();
/// Spinner::new(frame, &[button])?.kind(SpinnerKind::Dots);
/// ```
pub struct Spinner<'f> {
    inner: ElementMut<'f>,
    kind: SpinnerKind,
    tracking: bool,
}

element_widget!(Spinner);

impl<'f> Spinner<'f> {
    pub fn new(frame: &'f mut Frame, tracked: &[ElementId]) -> Result<Self> {
        if let Some(&missing) = tracked.iter().find(|&&id| !frame.tree().contains(id)) {
            return Err(UiError::UnknownElement(missing));
        }

        let mut inner = frame.create(ElementSpec::new("span").style(SPINNER_STYLE));
        let selector = format!("#{}", inner.dom_id());
        let frame = inner.frame();
        for &id in tracked {
            if let Some(data) = frame.get_mut(id) {
                data.attributes_mut().set("hx-indicator", selector.clone());
            }
        }

        let mut spinner = Self {
            inner,
            kind: SpinnerKind::default(),
            tracking: !tracked.is_empty(),
        };
        spinner.inner.size(Size::Sm);
        spinner.restyle();
        Ok(spinner)
    }

    pub fn kind(&mut self, kind: SpinnerKind) -> &mut Self {
        self.kind = kind;
        self.restyle();
        self
    }

    fn restyle(&mut self) {
        let mut classes = format!("loading-{}", self.kind);
        if self.tracking {
            classes.push_str(" htmx-indicator");
        }
        self.inner.classes(&classes);
    }
}
