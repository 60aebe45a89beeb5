//! Crate error type.
//!
//! Construction and lookup failures are fatal for the request that raised
//! them; the surrounding request layer turns them into an HTTP status via
//! [`UiError::status_code`].

use crate::dom::ElementId;
use crate::frame::RequestKey;

/// Errors raised while building, wiring or rendering an element tree.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// The request's frame was already rendered and removed from the registry.
    #[error("no frame is registered for request {0}")]
    FrameNotFound(RequestKey),

    /// An owned frame was rendered a second time.
    #[error("frame has already been rendered")]
    FrameRendered,

    /// Ambient frame lookup outside of a request scope.
    #[error("no request context is active on this task")]
    NoActiveRequest,

    /// An element key that does not belong to this frame.
    #[error("element {0:?} does not exist in this frame")]
    UnknownElement(ElementId),

    /// Data handed to a data-display element cannot be shown.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Constructor arguments that do not make sense together.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An endpoint template references a parameter the event did not provide.
    #[error("endpoint `{endpoint}` needs parameter `{name}`")]
    MissingRouteParam { endpoint: String, name: String },

    /// An extension asset that is neither a stylesheet nor a script.
    #[error("unsupported extension `{0}`, expected a .css or .js file")]
    UnsupportedExtension(String),

    /// No page or handler is registered for the request.
    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// A render hook refused to render its element.
    #[error("render hook failed: {0}")]
    Hook(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl UiError {
    /// HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RouteNotFound { .. } => 404,
            Self::InvalidData(_) | Self::InvalidArgument(_) | Self::Json(_) => 422,
            _ => 500,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = UiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let missing = UiError::RouteNotFound {
            method: "POST".into(),
            path: "/x".into(),
        };
        assert_eq!(missing.status_code(), 404);
        assert_eq!(UiError::InvalidData("empty".into()).status_code(), 422);
        assert_eq!(UiError::FrameRendered.status_code(), 500);
    }

    #[test]
    fn display_messages() {
        let err = UiError::MissingRouteParam {
            endpoint: "/item/{id}".into(),
            name: "id".into(),
        };
        assert_eq!(err.to_string(), "endpoint `/item/{id}` needs parameter `id`");
        assert_eq!(
            UiError::UnsupportedExtension("x.wasm".into()).to_string(),
            "unsupported extension `x.wasm`, expected a .css or .js file"
        );
    }
}
