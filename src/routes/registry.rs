//! Route registry: handler identity to path, path to handler.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::handler::Handler;

/// Process-wide map between handlers and the POST paths serving them.
///
/// Keys are handler content hashes, never closure addresses. Inserts are
/// idempotent and may happen while requests are being served.
pub trait RouteRegistry: Send + Sync {
    /// Serve `handler` under `path`. Returns `false` if the path was taken.
    fn register(&self, path: &str, handler: Handler) -> bool;

    /// Path already serving a handler with the same content hash.
    fn lookup(&self, handler: &Handler) -> Option<String>;

    fn exists(&self, path: &str) -> bool;

    fn get(&self, path: &str) -> Option<Handler>;

    /// Handler serving a request for `path`.
    ///
    /// The default only knows exact paths; registries holding `{name}`
    /// templates also match those and capture the segments.
    fn route(&self, path: &str) -> Option<RouteMatch> {
        self.get(path).map(|handler| RouteMatch {
            template: path.to_owned(),
            handler,
            params: Vec::new(),
        })
    }
}

/// A handler picked for a request path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The registered path, possibly with `{name}` segments.
    pub template: String,
    pub handler: Handler,
    /// Captured `{name}` segments in template order.
    pub params: Vec<(String, String)>,
}

/// Match `path` against a template whose `{name}` segments capture one
/// non-empty path segment each.
pub fn match_template(template: &str, path: &str) -> Option<Vec<(String, String)>> {
    let mut params = Vec::new();
    let mut segments = path.split('/');
    for pattern in template.split('/') {
        let segment = segments.next()?;
        match pattern.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            Some(name) if !segment.is_empty() => {
                params.push((name.to_owned(), segment.to_owned()));
            }
            Some(_) => return None,
            None if pattern == segment => {}
            None => return None,
        }
    }
    segments.next().is_none().then_some(params)
}

/// Exact path first, then the matching template with the fewest captures.
pub(crate) fn find_route<'a>(
    routes: impl IntoIterator<Item = (&'a String, &'a Handler)>,
    path: &str,
) -> Option<RouteMatch> {
    let mut best: Option<(&'a String, &'a Handler, Vec<(String, String)>)> = None;
    for (template, handler) in routes {
        if template == path {
            best = Some((template, handler, Vec::new()));
            break;
        }
        if !template.contains('{') {
            continue;
        }
        let Some(params) = match_template(template, path) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((current, _, captured)) => {
                (params.len(), template) < (captured.len(), *current)
            }
        };
        if better {
            best = Some((template, handler, params));
        }
    }
    best.map(|(template, handler, params)| RouteMatch {
        template: template.clone(),
        handler: handler.clone(),
        params,
    })
}

#[derive(Default)]
struct Routes {
    by_hash: HashMap<String, String>,
    by_path: HashMap<String, Handler>,
}

/// In-memory [`RouteRegistry`].
#[derive(Default)]
pub struct MemoryRoutes {
    inner: RwLock<Routes>,
}

impl MemoryRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every route.
    pub fn reset(&self) {
        let mut routes = self.inner.write();
        routes.by_hash.clear();
        routes.by_path.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_path.is_empty()
    }
}

impl RouteRegistry for MemoryRoutes {
    fn register(&self, path: &str, handler: Handler) -> bool {
        let mut routes = self.inner.write();
        if routes.by_path.contains_key(path) {
            return false;
        }
        routes
            .by_hash
            .entry(handler.content_hash().to_owned())
            .or_insert_with(|| path.to_owned());
        debug!(path, handler = handler.name(), "route registered");
        routes.by_path.insert(path.to_owned(), handler);
        true
    }

    fn lookup(&self, handler: &Handler) -> Option<String> {
        self.inner.read().by_hash.get(handler.content_hash()).cloned()
    }

    fn exists(&self, path: &str) -> bool {
        self.inner.read().by_path.contains_key(path)
    }

    fn get(&self, path: &str) -> Option<Handler> {
        self.inner.read().by_path.get(path).cloned()
    }

    fn route(&self, path: &str) -> Option<RouteMatch> {
        let routes = self.inner.read();
        if let Some(handler) = routes.by_path.get(path) {
            return Some(RouteMatch {
                template: path.to_owned(),
                handler: handler.clone(),
                params: Vec::new(),
            });
        }
        find_route(&routes.by_path, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::frame::RequestContext;
    use serde_json::Value;

    async fn save(_ctx: RequestContext, _payload: Value) -> Result<()> {
        Ok(())
    }

    #[test]
    fn register_and_lookup() {
        let routes = MemoryRoutes::new();
        let handler = Handler::new("app::save", save);
        assert!(routes.register("/save", handler.clone()));
        assert_eq!(routes.lookup(&handler).as_deref(), Some("/save"));
        assert!(routes.exists("/save"));
        assert_eq!(routes.get("/save").unwrap().name(), "app::save");
    }

    #[test]
    fn identical_handlers_share_a_route() {
        let routes = MemoryRoutes::new();
        routes.register("/save", Handler::new("app::save", save).with_source("x"));
        let rebuilt = Handler::new("app::save", save).with_source("x");
        assert_eq!(routes.lookup(&rebuilt).as_deref(), Some("/save"));
    }

    #[test]
    fn register_is_idempotent() {
        let routes = MemoryRoutes::new();
        let handler = Handler::new("app::save", save);
        assert!(routes.register("/save", handler.clone()));
        assert!(!routes.register("/save", handler));
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn template_segments() {
        let params = match_template("/orders/{id}/lines/{line}", "/orders/7/lines/b").unwrap();
        assert_eq!(
            params,
            [("id".to_owned(), "7".to_owned()), ("line".to_owned(), "b".to_owned())]
        );
        assert!(match_template("/orders/{id}", "/orders/").is_none());
        assert!(match_template("/orders/{id}", "/orders/7/save").is_none());
        assert!(match_template("/orders/{id}/save", "/orders/7").is_none());
        assert!(match_template("/orders/{id}", "/items/7").is_none());
    }

    #[test]
    fn route_prefers_exact_then_fewest_captures() {
        let routes = MemoryRoutes::new();
        routes.register("/orders/{id}/{action}", Handler::new("app::any", save));
        routes.register("/orders/{id}/save", Handler::new("app::save", save));
        routes.register("/orders/new/save", Handler::new("app::create", save));

        let exact = routes.route("/orders/new/save").unwrap();
        assert_eq!(exact.handler.name(), "app::create");
        assert!(exact.params.is_empty());

        let save_route = routes.route("/orders/3/save").unwrap();
        assert_eq!(save_route.template, "/orders/{id}/save");
        assert_eq!(save_route.params, [("id".to_owned(), "3".to_owned())]);

        let any = routes.route("/orders/3/delete").unwrap();
        assert_eq!(any.handler.name(), "app::any");
        assert!(routes.route("/orders").is_none());
    }

    #[test]
    fn reset_clears() {
        let routes = MemoryRoutes::new();
        let handler = Handler::new("app::save", save);
        routes.register("/save", handler.clone());
        routes.reset();
        assert!(routes.is_empty());
        assert!(routes.lookup(&handler).is_none());
    }
}
