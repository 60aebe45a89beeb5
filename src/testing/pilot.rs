//! Pilot: programmatic interaction with an [`App`](crate::app::App).
//!
//! The `Pilot` plays the browser: it sends page loads and event posts, adds
//! the partial-update headers the client library would send, and keeps the
//! cookies a session would carry.

use serde_json::Value;

use crate::app::{App, Request, Response, THEME_COOKIE};
use crate::frame::swap::{SWAP_HEADER, TARGET_HEADER};
use crate::frame::SwapStrategy;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless client for testing.
///
/// # Examples
///
/// ```ignore
/// use swapframe::testing::Pilot;
///
/// let mut pilot = Pilot::new(app);
/// let page = pilot.get("/").await;
/// let fragment = pilot.swap("/save", json!({}), "a-3", SwapStrategy::ReplaceOuter).await;
/// assert_eq!(pilot.open_frames(), 0);
/// ```
pub struct Pilot {
    app: App,
    cookies: Vec<(String, String)>,
    last: Option<Response>,
}

impl Pilot {
    pub fn new(app: App) -> Self {
        Self {
            app,
            cookies: Vec::new(),
            last: None,
        }
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Set a cookie sent with every following request.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.retain(|(key, _)| key != name);
        self.cookies.push((name.to_owned(), value.to_owned()));
    }

    /// Choose the theme pages render with.
    pub fn set_theme(&mut self, theme: &str) {
        self.set_cookie(THEME_COOKIE, theme);
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Load a full page.
    pub async fn get(&mut self, path: &str) -> Response {
        self.send(Request::get(path)).await
    }

    /// Post an event payload with no swap signal.
    pub async fn post(&mut self, path: &str, payload: Value) -> Response {
        self.send(Request::post(path, payload)).await
    }

    /// Post an event payload as a partial update of `target`.
    pub async fn swap(
        &mut self,
        path: &str,
        payload: Value,
        target: &str,
        strategy: SwapStrategy,
    ) -> Response {
        let request = Request::post(path, payload)
            .header(TARGET_HEADER, format!("#{target}"))
            .header(SWAP_HEADER, strategy.as_htmx());
        self.send(request).await
    }

    /// Send a prepared request with the session's cookies.
    pub async fn send(&mut self, mut request: Request) -> Response {
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request = request.header("Cookie", cookie);
        }
        let response = self.app.handle(request).await;
        self.last = Some(response.clone());
        response
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn last_response(&self) -> Option<&Response> {
        self.last.as_ref()
    }

    /// Frames still registered. Zero once every request has finished.
    pub fn open_frames(&self) -> usize {
        self.app.frames().len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
