//! Serialization of a frame's tree to HTML.
//!
//! Order of output: main roots depth-first in children order, then the
//! out-of-band container with every OOB element, then inline scripts.

use tracing::{debug, trace};

use crate::dom::ElementId;
use crate::error::{Result, UiError};
use crate::frame::Frame;

impl Frame {
    /// Render the whole frame and tear it down.
    ///
    /// A frame renders once; later calls fail with [`UiError::FrameRendered`].
    pub fn render(&mut self) -> Result<String> {
        if self.rendered {
            return Err(UiError::FrameRendered);
        }

        let mut out = String::new();
        let roots = self.roots().to_vec();
        for root in roots {
            self.render_node(root, false, &mut out)?;
        }

        if !self.oob.is_empty() {
            out.push_str(&format!(
                r#"<div id="{}" hx-swap-oob="afterbegin">"#,
                crate::html::escape(&self.config().oob_target)
            ));
            for id in self.oob.clone() {
                self.render_node(id, true, &mut out)?;
            }
            out.push_str("</div>");
        }

        for script in &self.scripts {
            out.push_str("<script>(function() {\n");
            out.push_str(script);
            out.push_str("\n}());</script>");
        }

        debug!(bytes = out.len(), "frame rendered");
        self.teardown();
        Ok(out)
    }

    /// Render a single element subtree without tearing the frame down.
    ///
    /// Scripts of the subtree are queued on the frame as usual.
    pub fn render_element(&mut self, id: ElementId) -> Result<String> {
        if !self.tree().contains(id) {
            return Err(UiError::UnknownElement(id));
        }
        let mut out = String::new();
        let oob = self.get(id).is_some_and(|data| data.is_oob());
        self.render_node(id, oob, &mut out)?;
        Ok(out)
    }

    /// Write one element and its children.
    ///
    /// `oob_pass` is true only for the top of an out-of-band subtree;
    /// nested OOB elements are skipped and render from the OOB list.
    fn render_node(&mut self, id: ElementId, oob_pass: bool, out: &mut String) -> Result<()> {
        let Some(data) = self.get_mut(id) else {
            return Ok(());
        };
        if (data.oob && !oob_pass) || !data.render_html {
            return Ok(());
        }

        let mut hook = data.hook.take();
        let before = match hook.as_mut() {
            Some(hook) => hook.before_render(data),
            None => Ok(()),
        };
        if let Err(err) = before {
            data.hook = hook;
            return Err(err);
        }
        if let Some(script) = data.script.clone() {
            self.scripts.push(script);
        }

        let result = self.write_element(id, out.len(), out);
        let result = match (result, hook.as_mut()) {
            (Ok(start), Some(hook)) => {
                let html = out.split_off(start);
                hook.after_render(html).map(|html| out.push_str(&html))
            }
            (Ok(_), None) => Ok(()),
            (Err(err), _) => Err(err),
        };

        if let Some(data) = self.get_mut(id) {
            data.hook = hook;
        }
        result
    }

    /// Write tag, attributes, content and children. Returns where the
    /// element's output starts in `out`.
    fn write_element(&mut self, id: ElementId, start: usize, out: &mut String) -> Result<usize> {
        let event = self.get(id).and_then(|data| data.event.clone());
        if let Some(event) = event {
            let attrs = event.resolve(self.tree(), &self.services)?;
            if let Some(data) = self.get_mut(id) {
                for (key, value) in attrs {
                    data.attributes.set(key, value);
                }
            }
        }

        let children = self.tree().children(id).to_vec();
        let Some(data) = self.get(id) else {
            return Ok(start);
        };
        let tag = data.tag.clone();
        let void = data.is_void();

        out.push('<');
        out.push_str(&tag);
        data.attributes.write_html(out);
        out.push('>');
        out.push_str(&data.content);

        if void {
            if !children.is_empty() {
                trace!(%tag, dropped = children.len(), "children of void element not rendered");
            }
            return Ok(start);
        }

        for child in children {
            self.render_node(child, false, out)?;
        }
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
        Ok(start)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::ElementData;
    use crate::element::hook::{AfterRender, BeforeRender};
    use crate::element::ElementSpec;
    use crate::event::Event;

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn nested_and_sibling_roots() {
        let mut frame = Frame::standalone();
        frame.element("div").within(|frame| {
            frame.text("span", "hi");
        });
        frame.element("p");
        insta::assert_snapshot!(
            frame.render().unwrap(),
            @r#"<div id="a-0"><span id="a-1">hi</span></div><p id="a-2"></p>"#
        );
    }

    #[test]
    fn void_element_drops_children() {
        let mut frame = Frame::standalone();
        frame.element("img").within(|frame| {
            frame.text("span", "ignored");
        });
        assert_eq!(frame.render().unwrap(), r#"<img id="a-0">"#);
    }

    #[test]
    fn content_and_attributes_escaped() {
        let mut frame = Frame::standalone();
        frame
            .text("p", "a < b & c")
            .attr("title", r#"say "hi""#);
        assert_eq!(
            frame.render().unwrap(),
            r#"<p id="a-0" title="say &quot;hi&quot;">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn disabled_elements_skip_subtree() {
        let mut frame = Frame::standalone();
        frame.element("div").render_html(false).within(|frame| {
            frame.element("span");
        });
        frame.element("p");
        assert_eq!(frame.render().unwrap(), r#"<p id="a-2"></p>"#);
    }

    // ── Out-of-band ──────────────────────────────────────────────────

    #[test]
    fn oob_elements_render_in_side_channel() {
        let mut frame = Frame::standalone();
        frame.element("div").within(|frame| {
            frame.element("section").within(|frame| {
                frame
                    .create(ElementSpec::new("div").oob(true))
                    .within(|frame| {
                        frame.text("span", "saved");
                    });
            });
        });
        assert_eq!(
            frame.render().unwrap(),
            concat!(
                r#"<div id="a-0"><section id="a-1"></section></div>"#,
                r#"<div id="toast" hx-swap-oob="afterbegin">"#,
                r#"<div id="a-2"><span id="a-3">saved</span></div>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn nested_oob_renders_once() {
        let mut frame = Frame::standalone();
        frame.create(ElementSpec::new("div").oob(true)).within(|frame| {
            frame.create(ElementSpec::new("p").oob(true));
        });
        let html = frame.render().unwrap();
        assert_eq!(html.matches(r#"id="a-1""#).count(), 1);
    }

    // ── Scripts ──────────────────────────────────────────────────────

    #[test]
    fn scripts_follow_tree() {
        let mut frame = Frame::standalone();
        frame.element("div").script("init();");
        assert_eq!(
            frame.render().unwrap(),
            "<div id=\"a-0\"></div><script>(function() {\ninit();\n}());</script>"
        );
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn event_attributes_written() {
        let mut frame = Frame::standalone();
        frame.text("button", "Go").on(Event::click("/go"));
        assert_eq!(
            frame.render().unwrap(),
            concat!(
                r#"<button id="a-0" hx-target="this" hx-swap="outerHTML" "#,
                r#"hx-post="/go" hx-trigger="click" hx-ext="json-enc">Go</button>"#
            )
        );
    }

    #[test]
    fn event_error_propagates() {
        let mut frame = Frame::standalone();
        frame
            .element("button")
            .on(Event::click("/orders/{id}/{line}").param("id", 1));
        assert!(matches!(
            frame.render(),
            Err(UiError::MissingRouteParam { .. })
        ));
    }

    // ── Hooks ────────────────────────────────────────────────────────

    #[test]
    fn hooks_run_around_element() {
        let mut frame = Frame::standalone();
        frame
            .element("div")
            .hook(BeforeRender(|data: &mut ElementData| -> Result<()> {
                data.set_content("lazy");
                Ok(())
            }));
        frame
            .element("p")
            .hook(AfterRender(|html: String| -> Result<String> { Ok(html.to_uppercase()) }));
        assert_eq!(
            frame.render().unwrap(),
            r#"<div id="a-0">lazy</div><P ID="A-1"></P>"#
        );
    }

    #[test]
    fn hook_error_propagates() {
        let mut frame = Frame::standalone();
        frame
            .element("div")
            .hook(BeforeRender(|_: &mut ElementData| -> Result<()> {
                Err(UiError::Hook("broken widget".to_owned()))
            }));
        assert!(matches!(frame.render(), Err(UiError::Hook(_))));
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn render_twice_fails() {
        let mut frame = Frame::standalone();
        frame.element("div");
        frame.render().unwrap();
        assert!(frame.is_rendered());
        assert!(frame.tree().is_empty());
        assert!(matches!(frame.render(), Err(UiError::FrameRendered)));
    }

    #[test]
    fn render_element_keeps_frame() {
        let mut frame = Frame::standalone();
        let id = frame.text("p", "x").id();
        assert_eq!(frame.render_element(id).unwrap(), r#"<p id="a-0">x</p>"#);
        assert!(!frame.is_rendered());
    }
}
