//! Element construction: specs, mutation handles, styling, hooks and rendering.

pub mod builder;
pub mod hook;
mod render;
pub mod style;

pub use builder::ElementMut;
pub use hook::{AfterRender, BeforeRender, RenderHook};
pub use style::{Size, Style, StyleSpec};

use crate::dom::{AttrValue, ElementKind};

/// Everything needed to construct an element.
///
/// # Examples
///
/// ```ignore
/// let spec = ElementSpec::new("p").content("hello").attr("title", "greeting");
/// let id = frame.create(spec).id();
/// ```
#[derive(Debug, Clone)]
pub struct ElementSpec {
    pub(crate) tag: String,
    pub(crate) content: Option<String>,
    pub(crate) render_html: bool,
    pub(crate) oob: bool,
    pub(crate) attrs: Vec<(String, AttrValue)>,
    pub(crate) style: StyleSpec,
    pub(crate) kind: ElementKind,
    pub(crate) fixed_id: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Text content, escaped unless the kind is raw HTML.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the element takes part in rendering (builder).
    pub fn render_html(mut self, enabled: bool) -> Self {
        self.render_html = enabled;
        self
    }

    /// Route the element to the out-of-band side channel (builder).
    pub fn oob(mut self, oob: bool) -> Self {
        self.oob = oob;
        self
    }

    /// Initial attribute, written after `id` in insertion order.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn style(mut self, style: StyleSpec) -> Self {
        self.style = style;
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Use `id` as the DOM id instead of allocating one.
    ///
    /// The allocator is not advanced.
    pub fn fixed_id(mut self, id: impl Into<String>) -> Self {
        self.fixed_id = Some(id.into());
        self
    }
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self {
            tag: "div".to_owned(),
            content: None,
            render_html: true,
            oob: false,
            attrs: Vec::new(),
            style: StyleSpec::default(),
            kind: ElementKind::Element,
            fixed_id: None,
        }
    }
}

impl From<&str> for ElementSpec {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
