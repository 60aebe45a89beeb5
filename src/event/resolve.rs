//! Render-time translation of an [`Event`] into client attributes.

use tracing::info;

use super::descriptor::{Endpoint, Event, Target};
use crate::dom::Tree;
use crate::error::{Result, UiError};
use crate::frame::Services;

/// Self-reference understood by the client.
pub const THIS: &str = "this";

/// Relative selector keywords passed through untouched.
///
/// `next` and `previous` also work bare, meaning the adjacent sibling.
const RELATIVE_SELECTORS: &[&str] = &["closest", "find", "next", "previous"];

impl Event {
    /// Attributes the client needs to fire this event, in output order.
    pub fn resolve(&self, tree: &Tree, services: &Services) -> Result<Vec<(&'static str, String)>> {
        let mut attrs = vec![
            ("hx-target", self.resolve_target(tree)?),
            ("hx-swap", self.swap_strategy().as_htmx().to_owned()),
            ("hx-post", self.resolve_endpoint(services)?),
            ("hx-trigger", self.trigger.clone()),
        ];
        if let Some(vals) = &self.vals {
            attrs.push(("hx-vals", vals.to_string()));
        }
        if let Some(include) = &self.include {
            attrs.push(("hx-include", include.clone()));
        }
        match &self.encoding {
            Some(encoding) => attrs.push(("hx-encoding", encoding.clone())),
            None => attrs.push(("hx-ext", services.config.default_extension.clone())),
        }
        Ok(attrs)
    }

    /// Selector for the swap target.
    pub fn resolve_target(&self, tree: &Tree) -> Result<String> {
        Ok(match &self.target {
            Target::This => THIS.to_owned(),
            Target::Deferred(f) => format!("#{}", f()),
            Target::Element(id) => {
                let data = tree.get(*id).ok_or(UiError::UnknownElement(*id))?;
                format!("#{}", data.dom_id())
            }
            Target::Selector(selector) => selector_or_id(selector),
        })
    }

    /// Path the event posts to.
    ///
    /// Handlers are looked up by content hash; an unknown handler gets a
    /// path derived from its hash and is registered on the spot.
    pub fn resolve_endpoint(&self, services: &Services) -> Result<String> {
        let template = match &self.endpoint {
            Endpoint::Path(path) if self.params.is_empty() => return Ok(path.clone()),
            Endpoint::Path(path) => path.clone(),
            Endpoint::Handler(handler) => match services.routes.lookup(handler) {
                Some(path) => path,
                None => {
                    let path = format!(
                        "{}{}",
                        services.config.hash_route_prefix,
                        handler.content_hash()
                    );
                    if !services.routes.exists(&path) {
                        services.routes.register(&path, handler.clone());
                        info!(%path, handler = handler.name(), "handler route created");
                    }
                    path
                }
            },
        };
        fill_params(&template, &self.params)
    }
}

/// Turn a bare id into an id selector; leave selectors alone.
fn selector_or_id(target: &str) -> String {
    let is_selector = target == THIS
        || target.contains('#')
        || target.starts_with('.')
        || RELATIVE_SELECTORS.iter().any(|keyword| is_relative(target, keyword));
    if is_selector {
        target.to_owned()
    } else {
        format!("#{target}")
    }
}

/// `target` is `keyword` alone or `keyword` followed by a space.
fn is_relative(target: &str, keyword: &str) -> bool {
    match target.strip_prefix(keyword) {
        Some("") => matches!(keyword, "next" | "previous"),
        Some(rest) => rest.starts_with(' '),
        None => false,
    }
}

/// Substitute `{name}` placeholders from `params`.
fn fill_params(template: &str, params: &[(String, String)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        let value = params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| UiError::MissingRouteParam {
                endpoint: template.to_owned(),
                name: name.to_owned(),
            })?;
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::dom::{ElementData, ElementKind};
    use crate::frame::{RequestContext, SwapStrategy};
    use crate::routes::{Handler, MemoryRoutes, RouteRegistry};

    async fn save(_ctx: RequestContext, _payload: Value) -> Result<()> {
        Ok(())
    }

    fn resolve(event: &Event) -> Vec<(&'static str, String)> {
        event.resolve(&Tree::new(), &Services::default()).unwrap()
    }

    // ── Targets ──────────────────────────────────────────────────────

    #[test]
    fn target_rules() {
        let tree = Tree::new();
        let target = |t: Target| Event::click("/x").target(t).resolve_target(&tree).unwrap();
        assert_eq!(target(Target::This), "this");
        assert_eq!(target("this".into()), "this");
        assert_eq!(target("list".into()), "#list");
        assert_eq!(target("#list".into()), "#list");
        assert_eq!(target(".row".into()), ".row");
        assert_eq!(target("closest tr".into()), "closest tr");
        assert_eq!(target("find .cell".into()), "find .cell");
        assert_eq!(target("next".into()), "next");
        assert_eq!(target("next tr".into()), "next tr");
        assert_eq!(target("previous".into()), "previous");
        assert_eq!(target("previous li".into()), "previous li");
        assert_eq!(target("next-row".into()), "#next-row");
        assert_eq!(target("previousButton".into()), "#previousButton");
        assert_eq!(target("finder".into()), "#finder");
        assert_eq!(target("closest".into()), "#closest");
        assert_eq!(target("div#main".into()), "div#main");
        assert_eq!(target(Target::deferred(|| "a-9".to_owned())), "#a-9");
    }

    #[test]
    fn element_target_uses_dom_id() {
        let mut tree = Tree::new();
        let mut data = ElementData::new("ul", ElementKind::Element);
        data.attributes.set("id", "a-3");
        let list = tree.insert_root(data);
        let event = Event::click("/x").target(list);
        assert_eq!(event.resolve_target(&tree).unwrap(), "#a-3");

        tree.remove(list);
        assert!(matches!(
            event.resolve_target(&tree),
            Err(UiError::UnknownElement(_))
        ));
    }

    // ── Attributes ───────────────────────────────────────────────────

    #[test]
    fn default_attributes() {
        assert_eq!(
            resolve(&Event::click("/save")),
            vec![
                ("hx-target", "this".to_owned()),
                ("hx-swap", "outerHTML".to_owned()),
                ("hx-post", "/save".to_owned()),
                ("hx-trigger", "click".to_owned()),
                ("hx-ext", "json-enc".to_owned()),
            ]
        );
    }

    #[test]
    fn optional_attributes() {
        let event = Event::submit("/upload")
            .swap(SwapStrategy::AfterBegin)
            .vals(json!({"kind": "csv"}))
            .include("#form")
            .encoding("multipart/form-data");
        let attrs = resolve(&event);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["hx-target", "hx-swap", "hx-post", "hx-trigger", "hx-vals", "hx-include", "hx-encoding"]
        );
        assert_eq!(attrs[1].1, "afterbegin");
        assert_eq!(attrs[4].1, r#"{"kind":"csv"}"#);
    }

    // ── Endpoints ────────────────────────────────────────────────────

    #[test]
    fn path_params() {
        let event = Event::click("/orders/{id}/lines/{line}")
            .param("id", 7)
            .param("line", "b");
        assert_eq!(
            event.resolve_endpoint(&Services::default()).unwrap(),
            "/orders/7/lines/b"
        );
    }

    #[test]
    fn literal_path_without_params_is_verbatim() {
        let path = Event::click("/orders/{id}")
            .resolve_endpoint(&Services::default())
            .unwrap();
        assert_eq!(path, "/orders/{id}");
    }

    #[test]
    fn missing_param() {
        let err = Event::click("/orders/{id}/lines/{line}")
            .param("id", 7)
            .resolve_endpoint(&Services::default())
            .unwrap_err();
        assert!(matches!(err, UiError::MissingRouteParam { name, .. } if name == "line"));
    }

    #[test]
    fn handler_self_registers_once() {
        let services = Services::default();
        let handler = Handler::new("app::save", save).with_source("body");
        let first = Event::click(handler.clone())
            .resolve_endpoint(&services)
            .unwrap();
        assert_eq!(
            first,
            format!("/_swapframe/hash/{}", handler.content_hash())
        );
        assert!(services.routes.exists(&first));

        // A textually identical handler built elsewhere resolves the same way.
        let rebuilt = Handler::new("app::save", save).with_source("body");
        let second = Event::click(rebuilt).resolve_endpoint(&services).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn registered_handler_uses_its_path() {
        let routes = Arc::new(MemoryRoutes::new());
        let handler = Handler::new("app::save", save);
        routes.register("/orders/{id}/save", handler.clone());
        let services = Services {
            routes,
            ..Services::default()
        };
        let path = Event::click(handler)
            .param("id", 3)
            .resolve_endpoint(&services)
            .unwrap();
        assert_eq!(path, "/orders/3/save");
    }
}
