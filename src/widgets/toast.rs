//! Toast notifications delivered through the out-of-band channel.

use crate::element::style::StyleSpec;
use crate::element::{ElementMut, ElementSpec};
use crate::frame::Frame;

const TOAST_STYLE: StyleSpec = StyleSpec::plain("alert");

/// A notification routed to the page's toast host.
///
/// In a fragment response the toast renders inside the out-of-band wrapper;
/// in a full page it is placed in the toast host directly.
pub struct Toast<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Toast);

impl<'f> Toast<'f> {
    pub fn new(frame: &'f mut Frame, message: &str) -> Self {
        let mut inner = frame.create(ElementSpec::new("div").oob(true).style(TOAST_STYLE));
        inner.classes("alert-info").within(|frame| {
            frame.text("span", message);
        });
        Self { inner }
    }

    pub fn info(&mut self) -> &mut Self {
        self.inner.classes("alert-info");
        self
    }

    pub fn success(&mut self) -> &mut Self {
        self.inner.classes("alert-success");
        self
    }

    pub fn warning(&mut self) -> &mut Self {
        self.inner.classes("alert-warning");
        self
    }

    pub fn error(&mut self) -> &mut Self {
        self.inner.classes("alert-error");
        self
    }
}
