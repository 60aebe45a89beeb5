//! Node types: ElementId, ElementKind, ElementData.

use std::fmt;

use slotmap::new_key_type;

use super::attrs::Attributes;
use crate::element::hook::RenderHook;
use crate::element::style::Style;
use crate::event::Event;
use crate::html::{escape, is_void};

new_key_type! {
    /// Arena key of an element inside its frame. Copy, lightweight (u64).
    ///
    /// This is not the DOM `id` attribute; see [`ElementData::dom_id`].
    pub struct ElementId;
}

/// How an element treats its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// Content is escaped when assigned.
    #[default]
    Element,
    /// Content is trusted HTML and passed through untouched.
    Html,
}

/// Data associated with a single element.
pub struct ElementData {
    pub(crate) tag: String,
    pub(crate) attributes: Attributes,
    pub(crate) content: String,
    pub(crate) kind: ElementKind,
    pub(crate) oob: bool,
    pub(crate) render_html: bool,
    pub(crate) script: Option<String>,
    pub(crate) event: Option<Event>,
    pub(crate) style: Style,
    pub(crate) hook: Option<Box<dyn RenderHook>>,
}

impl ElementData {
    pub(crate) fn new(tag: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            content: String::new(),
            kind,
            oob: false,
            render_html: true,
            script: None,
            event: None,
            style: Style::default(),
            hook: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The DOM `id` attribute assigned at construction.
    pub fn dom_id(&self) -> &str {
        self.attributes.text("id").unwrap_or_default()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// The class attribute, if set.
    pub fn classes(&self) -> Option<&str> {
        self.attributes.text("class")
    }

    /// Content as it will be written (already escaped unless raw).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Assign content, escaping it unless this is a raw-HTML element.
    pub fn set_content(&mut self, content: &str) {
        self.content = match self.kind {
            ElementKind::Element => escape(content),
            ElementKind::Html => content.to_owned(),
        };
    }

    /// Assign content verbatim regardless of kind.
    pub fn set_raw_content(&mut self, html: impl Into<String>) {
        self.content = html.into();
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.tag)
    }

    pub fn is_oob(&self) -> bool {
        self.oob
    }

    /// Whether this element takes part in rendering.
    pub fn renders(&self) -> bool {
        self.render_html
    }

    pub fn set_render_html(&mut self, enabled: bool) {
        self.render_html = enabled;
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementData")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("content", &self.content)
            .field("kind", &self.kind)
            .field("oob", &self.oob)
            .field("render_html", &self.render_html)
            .field("event", &self.event.is_some())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
