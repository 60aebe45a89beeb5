//! Render hooks: per-element callbacks around serialization.

use crate::dom::ElementData;
use crate::error::Result;

/// Callbacks run by the renderer around a single element.
///
/// `before_render` may rewrite the element (lazy content, extra attributes);
/// `after_render` receives the element's serialized HTML, children included,
/// and returns what is written in its place. Errors propagate out of
/// [`Frame::render`](crate::frame::Frame::render) untouched.
pub trait RenderHook: Send {
    fn before_render(&mut self, element: &mut ElementData) -> Result<()> {
        let _ = element;
        Ok(())
    }

    fn after_render(&mut self, html: String) -> Result<String> {
        Ok(html)
    }
}

/// Wrap a closure as a `before_render` hook.
pub struct BeforeRender<F>(pub F);

impl<F> RenderHook for BeforeRender<F>
where
    F: FnMut(&mut ElementData) -> Result<()> + Send,
{
    fn before_render(&mut self, element: &mut ElementData) -> Result<()> {
        (self.0)(element)
    }
}

/// Wrap a closure as an `after_render` hook.
pub struct AfterRender<F>(pub F);

impl<F> RenderHook for AfterRender<F>
where
    F: FnMut(String) -> Result<String> + Send,
{
    fn after_render(&mut self, html: String) -> Result<String> {
        (self.0)(html)
    }
}
