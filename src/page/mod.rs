//! Document shell rendered around a page handler.
//!
//! [`render_page`] builds `html` / `head` / `body` / content wrapper, opens
//! the content element, awaits the page handler, then closes the shell with
//! the footer, the toast host and the client scripts. Each region can be
//! customized through a [`PageDefinition`].

use serde_json::{json, Value};
use tracing::debug;

use crate::dom::ElementId;
use crate::element::ElementSpec;
use crate::error::Result;
use crate::frame::{ExtensionKind, Frame, RequestContext};
use crate::routes::Handler;

/// Classes of the default content wrapper.
const CONTENT_CLASSES: &str = "flex flex-col w-full min-h-screen";
/// Classes of the toast host.
const TOAST_CLASSES: &str = "toast toast-top toast-end text-wrap z-50";

const HEAD_STYLESHEETS: &[&str] = &[
    "libs/output.css",
    "libs/daisyui.css",
    "libs/daisyui-themes.css",
    "app.css",
];
const HEAD_SCRIPTS: &[&str] = &["libs/tailwind.js"];
const BODY_SCRIPTS: &[&str] = &["libs/htmx.min.js", "libs/htmx-json-enc.js", "default.js"];

// ---------------------------------------------------------------------------
// PageDefinition
// ---------------------------------------------------------------------------

/// Customization points of the document shell.
///
/// Every hook runs with the frame's cursor inside the region it is named
/// after, so elements it creates land there.
pub trait PageDefinition: Send + Sync {
    /// `lang` of the document root. `None` uses the configured language.
    fn lang(&self) -> Option<&str> {
        None
    }

    fn header(&self, frame: &mut Frame, head: ElementId) -> Result<()> {
        let _ = (frame, head);
        Ok(())
    }

    fn body(&self, frame: &mut Frame, body: ElementId) -> Result<()> {
        let _ = (frame, body);
        Ok(())
    }

    /// Return an element to use as the content region instead of `content`.
    fn content(&self, frame: &mut Frame, content: ElementId) -> Result<Option<ElementId>> {
        let _ = (frame, content);
        Ok(None)
    }

    /// Runs after the page handler, inside the content region.
    fn footer(&self, frame: &mut Frame, content: ElementId) -> Result<()> {
        let _ = (frame, content);
        Ok(())
    }
}

/// The shell with no customization.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPage;

impl PageDefinition for DefaultPage {}

/// Per-request shell options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions<'a> {
    /// Overrides the configured title.
    pub title: Option<&'a str>,
    /// Overrides the configured theme (e.g. from a cookie).
    pub theme: Option<&'a str>,
}

/// Elements of the shell the second half of the build needs.
struct Shell {
    head: ElementId,
    title: ElementId,
    description: ElementId,
    wrapper: ElementId,
    content: ElementId,
    depth: usize,
}

// ---------------------------------------------------------------------------
// render_page
// ---------------------------------------------------------------------------

/// Render a full document for `ctx`, running `handler` inside the content
/// region.
pub async fn render_page(
    ctx: &RequestContext,
    definition: &dyn PageDefinition,
    handler: &Handler,
    options: PageOptions<'_>,
) -> Result<String> {
    let shell = ctx.with_frame(|frame| open_shell(frame, definition, options))??;
    handler.call(ctx.clone(), Value::Null).await?;
    ctx.with_frame(|frame| close_shell(frame, definition, &shell))??;

    let html = ctx.render()?;
    debug!(key = %ctx.key(), "page rendered");
    Ok(format!("<!DOCTYPE html>{html}"))
}

fn open_shell(
    frame: &mut Frame,
    definition: &dyn PageDefinition,
    options: PageOptions<'_>,
) -> Result<Shell> {
    let config = frame.services().config.clone();
    let lang = definition.lang().unwrap_or(&config.lang).to_owned();
    let theme = options.theme.or(config.theme.as_deref()).map(str::to_owned);
    let title = options.title.unwrap_or(&config.title).to_owned();

    let mut html = frame.create(ElementSpec::new("html").fixed_id("html"));
    html.classes("overflow-y-scroll").attr("lang", lang);
    if let Some(theme) = theme {
        html.attr("data-theme", theme);
    }
    let html = html.id();
    frame.open(html)?;

    // head
    let head = frame.element("head").id();
    frame.open(head)?;
    frame
        .element("meta")
        .attr("name", "viewport")
        .attr("content", "width=device-width, initial-scale=1");
    frame.element("meta").attr("charset", "utf-8");
    let description = frame
        .element("meta")
        .attr("name", "description")
        .attr("content", "")
        .id();
    let title = frame.text("title", &title).id();
    for css in HEAD_STYLESHEETS {
        frame
            .element("link")
            .attr("href", config.static_url(css))
            .attr("rel", "stylesheet")
            .attr("type", "text/css");
    }
    for js in HEAD_SCRIPTS {
        frame.element("script").attr("src", config.static_url(js));
    }
    definition.header(frame, head)?;
    frame.close();

    // body
    let body = frame.element("body").attr("hx-ext", "swap-header").id();
    frame.open(body)?;
    definition.body(frame, body)?;

    let wrapper = frame.element("div").classes(CONTENT_CLASSES).id();
    frame.open(wrapper)?;
    let content = definition.content(frame, wrapper)?.unwrap_or(wrapper);
    if content != wrapper {
        frame.open(content)?;
    }

    Ok(Shell {
        head,
        title,
        description,
        wrapper,
        content,
        depth: frame.cursor_depth(),
    })
}

fn close_shell(frame: &mut Frame, definition: &dyn PageDefinition, shell: &Shell) -> Result<()> {
    let config = frame.services().config.clone();

    frame.truncate_cursor(shell.depth);
    definition.footer(frame, shell.wrapper)?;
    if shell.content != shell.wrapper {
        frame.close();
    }
    frame.close(); // content wrapper

    let toast = frame
        .create(ElementSpec::new("div").fixed_id(config.oob_target.clone()))
        .classes(TOAST_CLASSES)
        .attr(
            "hx-toast-delay",
            json!({ "delay": config.toast_delay_ms }).to_string(),
        )
        .id();
    frame.absorb_oob(toast);
    frame.close(); // body

    for js in BODY_SCRIPTS {
        frame.element("script").attr("src", config.static_url(js));
    }
    frame.close(); // html

    if let Some(title) = frame.title().map(str::to_owned) {
        frame.element_mut(shell.title)?.content(&title);
    }
    if let Some(description) = frame.meta_description().map(str::to_owned) {
        frame
            .element_mut(shell.description)?
            .attr("content", description);
    }

    let extensions = frame.extensions().to_vec();
    let of_kind = |kind: ExtensionKind| extensions.iter().filter(move |ext| ext.kind == kind);
    frame.within(shell.head, |frame| {
        // Same order as `Frame::render_extensions`: stylesheets newest first.
        for extension in of_kind(ExtensionKind::Stylesheet).rev() {
            frame
                .element("link")
                .attr("href", extension.endpoint.as_str())
                .attr("rel", "stylesheet");
        }
        for extension in of_kind(ExtensionKind::Script) {
            frame
                .element("script")
                .attr("src", extension.endpoint.as_str());
        }
    })?;
    Ok(())
}
