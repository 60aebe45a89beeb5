//! App: the server-agnostic request layer.
//!
//! [`App`] owns the registries and answers [`Request`]s with [`Response`]s.
//! GET requests to a registered page render a full document; POST requests
//! to a handler route render the handler's frame as a fragment. Binding the
//! App to an HTTP server is left to the host application.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::frame::{FrameRegistry, RequestContext, Services, SwapRequest};
use crate::html::escape;
use crate::page::{render_page, DefaultPage, PageDefinition, PageOptions};
use crate::routes::registry::find_route;
use crate::routes::{AssetRegistry, Handler, MemoryRoutes, RouteMatch, RouteRegistry};

/// Response header telling clients whether the body is a page or a fragment.
pub const CONTENT_HEADER: &str = "X-Swapframe-Content";
/// Cookie carrying the visitor's theme choice.
pub const THEME_COOKIE: &str = "data-theme";

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// An incoming request, already decoded by the host server.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            body: Value::Null,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Add a header (builder).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header named `name`, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of cookie `name` from the `Cookie` header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.header_value("cookie")?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    fn swap(&self) -> Option<SwapRequest> {
        SwapRequest::from_headers(
            self.headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
    }
}

/// What the body of a successful response holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Page,
    Fragment,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Fragment => "fragment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![
                ("Content-Type".to_owned(), "text/html; charset=utf-8".to_owned()),
                ("Cache-Control".to_owned(), "no-store".to_owned()),
            ],
            body,
        }
    }

    fn ok(kind: ContentKind, body: String) -> Self {
        let mut response = Self::html(200, body);
        response
            .headers
            .push((CONTENT_HEADER.to_owned(), kind.as_str().to_owned()));
        response
    }

    fn error(err: &UiError) -> Self {
        Self::html(err.status_code(), escape(&err.to_string()))
    }

    /// First header named `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Pages, handler routes and the frames of requests in flight.
pub struct App {
    services: Services,
    routes: Arc<MemoryRoutes>,
    frames: Arc<FrameRegistry>,
    pages: RwLock<HashMap<String, Handler>>,
    definition: Arc<dyn PageDefinition>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        let routes = Arc::new(MemoryRoutes::new());
        let services = Services::new(
            Arc::new(config),
            Arc::clone(&routes) as Arc<dyn RouteRegistry>,
            Arc::new(AssetRegistry::new()),
        );
        Self {
            services,
            routes,
            frames: Arc::new(FrameRegistry::new()),
            pages: RwLock::new(HashMap::new()),
            definition: Arc::new(DefaultPage),
        }
    }

    /// Use a custom document shell for every page (builder).
    pub fn with_page_definition(mut self, definition: impl PageDefinition + 'static) -> Self {
        self.definition = Arc::new(definition);
        self
    }

    pub fn config(&self) -> &UiConfig {
        &self.services.config
    }

    pub fn routes(&self) -> &MemoryRoutes {
        &self.routes
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.services.assets
    }

    /// Frames of requests that have not rendered yet.
    pub fn frames(&self) -> &FrameRegistry {
        &self.frames
    }

    /// Serve a full document at `path` (GET). Replaces any previous page.
    pub fn page(&self, path: impl Into<String>, handler: Handler) {
        let path = path.into();
        info!(%path, handler = handler.name(), "page registered");
        self.pages.write().insert(path, handler);
    }

    /// Serve a fragment handler at `path` (POST).
    ///
    /// Returns `false` if the path already serves a handler.
    pub fn ui(&self, path: &str, handler: Handler) -> bool {
        self.routes.register(path, handler)
    }

    /// A fresh request context bound to this app's registries.
    pub fn context(&self, swap: Option<SwapRequest>) -> RequestContext {
        RequestContext::new(Arc::clone(&self.frames), self.services.clone(), swap)
    }

    /// File backing an extension asset URL, if one was registered.
    ///
    /// URLs look like `<static>/extension/<version>/<owner>/<file>`.
    pub fn asset(&self, url: &str) -> Option<PathBuf> {
        let config = self.config();
        let prefix = format!("{}/extension/{}/", config.static_prefix, config.version);
        let key = url.strip_prefix(&prefix)?;
        self.services.assets.get(key)
    }

    /// Answer one request.
    ///
    /// The request's frame is discarded if the handler fails, so errors never
    /// leak frames.
    pub async fn handle(&self, request: Request) -> Response {
        let route = match request.method {
            Method::Get => find_route(self.pages.read().iter(), &request.path),
            Method::Post => self.routes.route(&request.path),
        };
        let params = route
            .as_ref()
            .map(|route| route.params.clone())
            .unwrap_or_default();
        let ctx = self.context(request.swap()).with_params(params);
        let _guard = ctx.guard();
        debug!(
            key = %ctx.key(),
            method = request.method.as_str(),
            path = %request.path,
            route = route.as_ref().map(|route| route.template.as_str()),
            "request"
        );

        match ctx.clone().scope(self.dispatch(&ctx, &request, route)).await {
            Ok((kind, body)) => Response::ok(kind, body),
            Err(err) => {
                warn!(
                    key = %ctx.key(),
                    path = %request.path,
                    error = %err,
                    "request failed"
                );
                Response::error(&err)
            }
        }
    }

    async fn dispatch(
        &self,
        ctx: &RequestContext,
        request: &Request,
        route: Option<RouteMatch>,
    ) -> Result<(ContentKind, String)> {
        let handler = route
            .map(|route| route.handler)
            .ok_or_else(|| UiError::RouteNotFound {
                method: request.method.as_str().to_owned(),
                path: request.path.clone(),
            })?;

        match request.method {
            Method::Get => {
                let options = PageOptions {
                    title: None,
                    theme: request.cookie(THEME_COOKIE),
                };
                let html = render_page(ctx, self.definition.as_ref(), &handler, options).await?;
                Ok((ContentKind::Page, html))
            }
            Method::Post => {
                ctx.frame()?;
                handler.call(ctx.clone(), request.body.clone()).await?;
                Ok((ContentKind::Fragment, ctx.render()?))
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.services.config)
            .field("pages", &self.pages.read().len())
            .field("routes", &self.routes.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
