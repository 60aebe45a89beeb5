//! Process-wide map from in-flight requests to their frames.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::context::Frame;
use super::request::Services;
use super::swap::SwapRequest;
use crate::error::{Result, UiError};

/// Identity of one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey(u64);

impl RequestKey {
    /// A key no other request in this process has used.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Shared handle to a registered frame.
pub type FrameHandle = Arc<Mutex<Frame>>;

// ---------------------------------------------------------------------------
// FrameRegistry
// ---------------------------------------------------------------------------

/// One frame per in-flight request, created lazily and removed on render.
#[derive(Default)]
pub struct FrameRegistry {
    frames: Mutex<HashMap<RequestKey, FrameHandle>>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame of `key`, creating it on first access.
    pub fn get_or_create(
        &self,
        key: RequestKey,
        services: &Services,
        swap: Option<&SwapRequest>,
    ) -> FrameHandle {
        let mut frames = self.frames.lock();
        frames
            .entry(key)
            .or_insert_with(|| {
                debug!(%key, swap = swap.is_some(), "frame created");
                Arc::new(Mutex::new(Frame::new(services.clone(), swap.cloned())))
            })
            .clone()
    }

    pub fn get(&self, key: RequestKey) -> Option<FrameHandle> {
        self.frames.lock().get(&key).cloned()
    }

    pub fn contains(&self, key: RequestKey) -> bool {
        self.frames.lock().contains_key(&key)
    }

    /// Remove the frame of `key` and render it.
    ///
    /// Fails with [`UiError::FrameNotFound`] if the frame was already
    /// rendered or discarded.
    pub fn render(&self, key: RequestKey) -> Result<String> {
        let handle = self
            .frames
            .lock()
            .remove(&key)
            .ok_or(UiError::FrameNotFound(key))?;
        debug!(%key, "frame removed for render");
        let html = handle.lock().render();
        html
    }

    /// Drop the frame of `key` without rendering. Returns whether it existed.
    pub fn discard(&self, key: RequestKey) -> bool {
        self.frames.lock().remove(&key).is_some()
    }

    /// Number of frames still registered.
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRegistry")
            .field("frames", &self.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FrameGuard
// ---------------------------------------------------------------------------

/// Removes a request's frame when dropped.
///
/// Held for the lifetime of a request so frames of requests that error out
/// or are cancelled before rendering do not stay in the registry.
pub struct FrameGuard {
    key: RequestKey,
    registry: Arc<FrameRegistry>,
}

impl FrameGuard {
    pub fn new(key: RequestKey, registry: Arc<FrameRegistry>) -> Self {
        Self { key, registry }
    }

    pub fn key(&self) -> RequestKey {
        self.key
    }
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        if self.registry.discard(self.key) {
            debug!(key = %self.key, "abandoned frame discarded");
        }
    }
}
