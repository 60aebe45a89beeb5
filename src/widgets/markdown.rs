//! Markdown widget.
//!
//! Conversion is deferred to render time through a [`RenderHook`], so the
//! content can still be replaced after construction.

use pulldown_cmark::{Options, Parser};

use crate::dom::{ElementData, ElementKind};
use crate::element::style::StyleSpec;
use crate::element::{ElementMut, ElementSpec, RenderHook};
use crate::error::Result;
use crate::frame::Frame;

const MARKDOWN_STYLE: StyleSpec = StyleSpec::plain("markdown-body");

/// Convert markdown to HTML, with list classes the stylesheet relies on.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html.replace("<ul>", r#"<ul class="list-disc">"#)
        .replace("<ol>", r#"<ol class="list-decimal">"#)
}

/// Converts the element's content once, right before it is written.
#[derive(Debug, Default)]
struct Convert;

impl RenderHook for Convert {
    fn before_render(&mut self, data: &mut ElementData) -> Result<()> {
        let html = to_html(data.content());
        data.set_raw_content(html);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

/// A `div` rendering markdown source as HTML.
pub struct Markdown<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Markdown);

impl<'f> Markdown<'f> {
    pub fn new(frame: &'f mut Frame, source: &str) -> Self {
        let spec = ElementSpec::new("div")
            .kind(ElementKind::Html)
            .style(MARKDOWN_STYLE)
            .content(source);
        let mut inner = frame.create(spec);
        inner.hook(Convert);
        Self { inner }
    }
}
