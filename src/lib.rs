//! # swapframe
//!
//! Server-side rendering core for hypermedia-driven UIs.
//!
//! Handlers build an element tree into a per-request [`Frame`]; the frame
//! renders to HTML once, with ids that stay stable across partial updates,
//! event attributes for an HTMX-style client, and an out-of-band side channel
//! for notifications. Event handlers are routed by a hash of their content,
//! so every process that builds the same handler serves it at the same path.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed element arena with tree operations and queries
//! - **[`element`]**: Element specs, the chained `ElementMut` handle, styling, hooks, rendering
//! - **[`frame`]**: Frames, swap-aware id allocation, the frame registry and request context
//! - **[`event`]**: Event descriptors and their resolution to request attributes
//! - **[`routes`]**: Handlers, the content-hash route registry, extension assets
//! - **[`page`]**: The document shell around page handlers
//! - **[`widgets`]**: Built-in widgets: Button, Input, Label, Row, Col, Toast, Spinner, Dict, ...
//! - **[`app`]**: Server-agnostic request layer
//! - **[`testing`]**: Fragment helpers and the `Pilot` test client

// Foundation
pub mod config;
pub mod error;
pub mod html;

// Core systems
pub mod dom;
pub mod element;
pub mod frame;

// Behavior
pub mod event;
pub mod routes;

// Documents and widgets
pub mod page;
pub mod widgets;

// Application
pub mod app;
pub mod testing;

pub use app::{App, Request, Response};
pub use config::UiConfig;
pub use dom::{ElementId, ElementKind};
pub use element::{ElementMut, ElementSpec, Size};
pub use error::{Result, UiError};
pub use event::{Endpoint, Event, Target};
pub use frame::{Frame, FrameRegistry, RequestContext, SwapRequest, SwapStrategy};
pub use page::{render_page, PageDefinition};
pub use routes::{Handler, MemoryRoutes, RouteRegistry};
