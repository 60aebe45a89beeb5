//! Route identity bridge: handlers, the route registry, static assets.

pub mod assets;
pub mod handler;
pub mod registry;

pub use assets::AssetRegistry;
pub use handler::{content_hash, Handler, HandlerFuture};
pub use registry::{match_template, MemoryRoutes, RouteMatch, RouteRegistry};
