//! Event handlers and their content-derived identity.
//!
//! A handler's route is keyed by a hash of its source text and name rather
//! than by the closure's address, so every process that builds the same
//! handler resolves it to the same path.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::frame::{Frame, RequestContext};

/// Boxed future returned by a handler call.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

type Callback = Arc<dyn Fn(RequestContext, Value) -> HandlerFuture + Send + Sync>;

/// sha256 hex digest of `source`, a NUL byte and `name`, or of `name` alone
/// when the source is unknown.
pub fn content_hash(name: &str, source: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    if let Some(source) = source {
        hasher.update(source.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A callable bound to an element event.
#[derive(Clone)]
pub struct Handler {
    name: String,
    source: Option<String>,
    hash: String,
    callback: Callback,
}

impl Handler {
    /// Wrap an async function. `name` should be module-qualified.
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(RequestContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let name = name.into();
        let callback: Callback = Arc::new(move |ctx: RequestContext, payload: Value| -> HandlerFuture {
            Box::pin(f(ctx, payload))
        });
        Self {
            hash: content_hash(&name, None),
            name,
            source: None,
            callback,
        }
    }

    /// Wrap a synchronous builder that only touches the request's frame.
    pub fn sync<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Frame, &Value) -> Result<()> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(name, move |ctx: RequestContext, payload: Value| {
            let f = Arc::clone(&f);
            async move { ctx.with_frame(|frame| f(frame, &payload))? }
        })
    }

    /// Attach the handler's source text, which becomes part of its identity.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.hash = content_hash(&self.name, Some(&source));
        self.source = Some(source);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Stable identity used as the route registry key.
    pub fn content_hash(&self) -> &str {
        &self.hash
    }

    pub fn call(&self, ctx: RequestContext, payload: Value) -> HandlerFuture {
        (self.callback)(ctx, payload)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("source", &self.source.is_some())
            .finish()
    }
}

/// Build a [`Handler`] named after the enclosing module.
///
/// ```ignore
/// // async fn, identified by its qualified name
/// let h = handler!(save_order);
/// // closure, identified by its source text and name
/// let h = handler!(greet => |ctx, payload| async move { Ok(()) });
/// // synchronous frame builder
/// let h = handler!(sync toast => |frame, _payload| { Toast::new(frame, "saved"); Ok(()) });
/// ```
#[macro_export]
macro_rules! handler {
    (sync $name:ident => $body:expr) => {
        $crate::routes::Handler::sync(
            concat!(module_path!(), "::", stringify!($name)),
            $body,
        )
        .with_source(stringify!($body))
    };
    ($name:ident => $body:expr) => {
        $crate::routes::Handler::new(
            concat!(module_path!(), "::", stringify!($name)),
            $body,
        )
        .with_source(stringify!($body))
    };
    ($func:path) => {
        $crate::routes::Handler::new(concat!(module_path!(), "::", stringify!($func)), $func)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop(_ctx: RequestContext, _payload: Value) -> Result<()> {
        Ok(())
    }

    #[test]
    fn hash_is_stable_across_definitions() {
        // Two independently built handlers with identical text.
        let a = Handler::new("app::save", noop).with_source("|ctx, p| save(ctx, p)");
        let b = Handler::new("app::save", noop).with_source("|ctx, p| save(ctx, p)");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }

    #[test]
    fn source_changes_identity() {
        let a = Handler::new("app::save", noop).with_source("one");
        let b = Handler::new("app::save", noop).with_source("two");
        let bare = Handler::new("app::save", noop);
        assert_ne!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), bare.content_hash());
    }

    #[test]
    fn source_and_name_do_not_run_together() {
        assert_ne!(
            content_hash("c", Some("ab")),
            content_hash("bc", Some("a"))
        );
        assert_ne!(content_hash("ab", Some("")), content_hash("ab", None));
    }

    #[test]
    fn fallback_hash_uses_qualified_name() {
        let bare = Handler::new("app::save", noop);
        assert_eq!(bare.content_hash(), content_hash("app::save", None));
        assert_ne!(
            bare.content_hash(),
            Handler::new("other::save", noop).content_hash()
        );
    }

    #[test]
    fn macro_forms() {
        let by_path = handler!(noop);
        assert!(by_path.name().ends_with("::noop"));
        assert!(by_path.source().is_none());

        let closure = handler!(greet => |_ctx, _payload| async move { Result::<()>::Ok(()) });
        assert!(closure.name().ends_with("::greet"));
        assert!(closure.source().is_some());

        let sync = handler!(sync ping => |_frame: &mut Frame, _payload: &Value| Ok(()));
        assert!(sync.source().unwrap().contains("Ok"));
    }

    #[test]
    fn call_runs_sync_builder() {
        use crate::frame::{FrameRegistry, Services};

        let frames = Arc::new(FrameRegistry::new());
        let ctx = RequestContext::new(Arc::clone(&frames), Services::default(), None);
        let handler = Handler::sync("t::ping", |frame, payload| {
            frame.text("p", payload["msg"].as_str().unwrap_or_default());
            Ok(())
        });
        tokio_test::block_on(handler.call(ctx.clone(), serde_json::json!({"msg": "pong"})))
            .unwrap();
        assert_eq!(ctx.render().unwrap(), r#"<p id="a-0">pong</p>"#);
    }
}
