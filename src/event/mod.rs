//! Event binding: descriptors and their render-time attribute resolution.

pub mod descriptor;
pub mod resolve;

pub use descriptor::{Endpoint, Event, Target};
pub use resolve::THIS;
