//! `ElementMut`: the chained mutation handle returned by construction.

use crate::dom::{AttrValue, ElementData, ElementId};
use crate::element::hook::RenderHook;
use crate::element::style::Size;
use crate::event::Event;
use crate::frame::Frame;

/// Mutable view of one element in its frame.
///
/// Every setter returns `&mut Self` so calls chain:
///
/// ```ignore
/// frame.element("div").classes("card").within(|frame| {
///     frame.text("span", "hi");
/// });
/// ```
pub struct ElementMut<'f> {
    frame: &'f mut Frame,
    id: ElementId,
}

impl<'f> ElementMut<'f> {
    pub(crate) fn new(frame: &'f mut Frame, id: ElementId) -> Self {
        Self { frame, id }
    }

    /// Arena key of the element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// DOM `id` attribute.
    pub fn dom_id(&self) -> &str {
        self.frame
            .get(self.id)
            .map(ElementData::dom_id)
            .unwrap_or_default()
    }

    pub fn data(&self) -> Option<&ElementData> {
        self.frame.get(self.id)
    }

    pub(crate) fn frame(&mut self) -> &mut Frame {
        self.frame
    }

    fn update(&mut self, f: impl FnOnce(&mut ElementData)) -> &mut Self {
        if let Some(data) = self.frame.get_mut(self.id) {
            f(data);
        }
        self
    }

    // ── Styling ──────────────────────────────────────────────────────

    /// Set the class attribute to the kind's base classes plus `classes`.
    pub fn classes(&mut self, classes: &str) -> &mut Self {
        self.update(|data| data.style.apply_classes(&mut data.attributes, classes))
    }

    /// Swap the kind's size token.
    pub fn size(&mut self, size: Size) -> &mut Self {
        self.update(|data| data.style.apply_size(&mut data.attributes, size))
    }

    // ── Attributes and content ───────────────────────────────────────

    pub fn attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        self.update(|data| data.attributes.set(key, value))
    }

    /// Set a valueless attribute such as `disabled`.
    pub fn flag(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.update(|data| data.attributes.set_flag(key))
    }

    /// Replace the content, escaping it unless the kind is raw HTML.
    pub fn content(&mut self, content: &str) -> &mut Self {
        self.update(|data| data.set_content(content))
    }

    /// Replace the content with trusted HTML.
    pub fn raw(&mut self, html: impl Into<String>) -> &mut Self {
        let html = html.into();
        self.update(|data| data.set_raw_content(html))
    }

    /// Inline script emitted once, after the rendered tree.
    pub fn script(&mut self, script: impl Into<String>) -> &mut Self {
        let script = script.into();
        self.update(|data| data.script = Some(script))
    }

    pub fn render_html(&mut self, enabled: bool) -> &mut Self {
        self.update(|data| data.set_render_html(enabled))
    }

    // ── Behavior ─────────────────────────────────────────────────────

    /// Attach an event binding, replacing any previous one.
    pub fn on(&mut self, event: Event) -> &mut Self {
        self.update(|data| data.event = Some(event))
    }

    /// Install a render hook, replacing any previous one.
    pub fn hook(&mut self, hook: impl RenderHook + 'static) -> &mut Self {
        self.update(|data| data.hook = Some(Box::new(hook)))
    }

    // ── Nesting ──────────────────────────────────────────────────────

    /// Build children of this element inside `f`.
    ///
    /// The frame's previous cursor is restored when `f` returns, closing
    /// anything `f` left open.
    pub fn within<R>(&mut self, f: impl FnOnce(&mut Frame) -> R) -> R {
        let depth = self.frame.cursor_depth();
        self.frame.push_cursor(self.id);
        let result = f(self.frame);
        self.frame.truncate_cursor(depth);
        result
    }
}
