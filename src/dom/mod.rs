//! Element arena: slotmap-backed tree with DOM id, class and tag queries.

pub mod attrs;
pub mod node;
pub mod query;
pub mod tree;

pub use attrs::{AttrValue, Attributes, Deferred};
pub use node::{ElementData, ElementId, ElementKind};
pub use tree::Tree;
