//! Label widget.

use crate::dom::ElementId;
use crate::element::{ElementMut, ElementSpec};
use crate::error::{Result, UiError};
use crate::frame::Frame;

/// A `<label>`, optionally pointing at another element.
pub struct Label<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Label);

impl<'f> Label<'f> {
    pub fn new(frame: &'f mut Frame, text: &str) -> Self {
        Self {
            inner: frame.create(ElementSpec::new("label").content(text)),
        }
    }

    /// Point the label's `for` attribute at `element`.
    pub fn for_element(&mut self, element: ElementId) -> Result<&mut Self> {
        let target = self
            .inner
            .frame()
            .get(element)
            .map(|data| data.dom_id().to_owned())
            .ok_or(UiError::UnknownElement(element))?;
        self.inner.attr("for", target);
        Ok(self)
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.inner.content(text);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::widgets::Input;

    #[test]
    fn points_at_input() {
        let mut frame = Frame::standalone();
        let input = Input::new(&mut frame, "email").id();
        Label::new(&mut frame, "Email")
            .for_element(input)
            .unwrap()
            .set_text("E-mail");
        let html = frame.render().unwrap();
        assert!(html.ends_with(r#"<label id="a-1" for="a-0">E-mail</label>"#));
    }

    #[test]
    fn unknown_target() {
        let mut other = Frame::standalone();
        let foreign = other.element("div").id();
        let mut frame = Frame::standalone();
        let mut label = Label::new(&mut frame, "x");
        assert!(matches!(
            label.for_element(foreign),
            Err(UiError::UnknownElement(_))
        ));
    }

    #[test]
    fn text_escaped() {
        let mut frame = Frame::standalone();
        Label::new(&mut frame, "a & b");
        assert_eq!(frame.render().unwrap(), r#"<label id="a-0">a &amp; b</label>"#);
    }
}
