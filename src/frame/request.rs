//! Per-request context: explicit handle plus an optional task-local scope.
//!
//! A [`RequestContext`] is created by the request layer and handed to page
//! and event handlers. It can also be installed as a task-local for code
//! that cannot take it as an argument; the scope covers every `.await` of
//! the same future, so concurrent requests on one runtime never see each
//! other's frames.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::context::Frame;
use super::registry::{FrameGuard, FrameHandle, FrameRegistry, RequestKey};
use super::swap::SwapRequest;
use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::routes::{AssetRegistry, MemoryRoutes, RouteRegistry};

tokio::task_local! {
    static CURRENT: RequestContext;
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Process-wide collaborators every frame can reach.
#[derive(Clone)]
pub struct Services {
    pub config: Arc<UiConfig>,
    pub routes: Arc<dyn RouteRegistry>,
    pub assets: Arc<AssetRegistry>,
}

impl Services {
    pub fn new(
        config: Arc<UiConfig>,
        routes: Arc<dyn RouteRegistry>,
        assets: Arc<AssetRegistry>,
    ) -> Self {
        Self {
            config,
            routes,
            assets,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self {
            config: Arc::new(UiConfig::default()),
            routes: Arc::new(MemoryRoutes::new()),
            assets: Arc::new(AssetRegistry::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// RequestContext
// ---------------------------------------------------------------------------

/// Explicit handle to the logical request being served.
#[derive(Clone)]
pub struct RequestContext {
    key: RequestKey,
    frames: Arc<FrameRegistry>,
    services: Services,
    swap: Option<SwapRequest>,
    params: Arc<[(String, String)]>,
    torn_down: Arc<AtomicBool>,
}

impl RequestContext {
    /// Start a new logical request.
    pub fn new(frames: Arc<FrameRegistry>, services: Services, swap: Option<SwapRequest>) -> Self {
        Self {
            key: RequestKey::next(),
            frames,
            services,
            swap,
            params: Arc::from(Vec::new()),
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach the path segments captured by the matched route (builder).
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params.into();
        self
    }

    /// Captured path segments in route order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the `{name}` segment of the matched route.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn key(&self) -> RequestKey {
        self.key
    }

    pub fn swap(&self) -> Option<&SwapRequest> {
        self.swap.as_ref()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn config(&self) -> &UiConfig {
        &self.services.config
    }

    /// This request's frame, created on first access.
    ///
    /// After the frame rendered this fails with [`UiError::FrameNotFound`].
    pub fn frame(&self) -> Result<FrameHandle> {
        if self.torn_down.load(Ordering::Acquire) {
            return Err(UiError::FrameNotFound(self.key));
        }
        Ok(self
            .frames
            .get_or_create(self.key, &self.services, self.swap.as_ref()))
    }

    /// Run `f` with this request's frame locked.
    ///
    /// Do not hold the lock across an `.await`; call this once per
    /// synchronous building step.
    pub fn with_frame<R>(&self, f: impl FnOnce(&mut Frame) -> R) -> Result<R> {
        let handle = self.frame()?;
        let mut frame = handle.lock();
        Ok(f(&mut frame))
    }

    /// Render this request's frame and remove it from the registry.
    pub fn render(&self) -> Result<String> {
        self.torn_down.store(true, Ordering::Release);
        self.frames.render(self.key)
    }

    /// Guard that discards the frame if the request ends without rendering.
    pub fn guard(&self) -> FrameGuard {
        FrameGuard::new(self.key, Arc::clone(&self.frames))
    }

    /// Run `fut` with this context installed as the task-local request.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT.scope(self, fut).await
    }

    /// The request installed by [`scope`](Self::scope) on this task.
    pub fn current() -> Result<RequestContext> {
        CURRENT
            .try_with(Clone::clone)
            .map_err(|_| UiError::NoActiveRequest)
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("key", &self.key)
            .field("swap", &self.swap)
            .field("params", &self.params)
            .field("torn_down", &self.torn_down.load(Ordering::Relaxed))
            .finish()
    }
}

/// Frame of the request installed on the current task.
pub fn current_frame() -> Result<FrameHandle> {
    RequestContext::current()?.frame()
}
