//! Raw HTML widget.

use crate::dom::ElementKind;
use crate::element::{ElementMut, ElementSpec};
use crate::frame::Frame;

/// A `div` whose content is trusted HTML, written without escaping.
pub struct Html<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Html);

impl<'f> Html<'f> {
    pub fn new(frame: &'f mut Frame, html: &str) -> Self {
        let spec = ElementSpec::new("div").kind(ElementKind::Html).content(html);
        Self {
            inner: frame.create(spec),
        }
    }
}
