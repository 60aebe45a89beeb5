//! Request-scoped render contexts.
//!
//! - [`Frame`]: element tree, cursor, ids, scripts, extensions, metadata
//! - [`FrameRegistry`] / [`RequestContext`]: one frame per logical request
//! - [`SwapRequest`]: the incoming partial-update signal

pub mod context;
pub mod extension;
pub mod ids;
pub mod registry;
pub mod request;
pub mod swap;

pub use context::Frame;
pub use extension::{Extension, ExtensionKind};
pub use ids::{derive_id, IdAllocator};
pub use registry::{FrameGuard, FrameHandle, FrameRegistry, RequestKey};
pub use request::{current_frame, RequestContext, Services};
pub use swap::{SwapRequest, SwapStrategy};
