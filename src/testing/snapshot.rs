//! Fragment rendering helpers for snapshot-style assertions.

use crate::error::Result;
use crate::frame::{Frame, Services, SwapRequest};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a tree in a fresh standalone frame and render it.
///
/// # Examples
///
/// ```ignore
/// use swapframe::testing::fragment;
///
/// let html = fragment(|frame| {
///     frame.text("p", "hello");
///     Ok(())
/// })?;
/// assert_eq!(html, r#"<p id="a-0">hello</p>"#);
/// ```
pub fn fragment(build: impl FnOnce(&mut Frame) -> Result<()>) -> Result<String> {
    fragment_with(Services::default(), None, build)
}

/// Same as [`fragment`] with explicit services and swap request.
pub fn fragment_with(
    services: Services,
    swap: Option<SwapRequest>,
    build: impl FnOnce(&mut Frame) -> Result<()>,
) -> Result<String> {
    let mut frame = Frame::new(services, swap);
    build(&mut frame)?;
    frame.render()
}

// ===========================================================================
// Tests
// ===========================================================================
