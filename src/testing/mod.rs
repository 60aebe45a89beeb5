//! Test helpers: render fragments and drive an [`App`](crate::app::App)
//! without a server.
//!
//! Use [`fragment`] to build a tree in a throwaway frame and get its HTML.
//! Use the [`Pilot`] to send requests to an app and keep per-session state
//! such as the theme cookie.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{fragment, fragment_with};
