//! Event descriptors: what an element sends where, and how the reply lands.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::dom::ElementId;
use crate::frame::SwapStrategy;
use crate::routes::Handler;

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Element the server response is swapped into.
#[derive(Clone, Default)]
pub enum Target {
    /// The element carrying the event.
    #[default]
    This,
    /// Closure returning a DOM id, called at render time.
    Deferred(Arc<dyn Fn() -> String + Send + Sync>),
    /// Another element of the same frame.
    Element(ElementId),
    /// A DOM id or a selector understood by the client.
    Selector(String),
}

impl Target {
    pub fn deferred(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Deferred(Arc::new(f))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::This => write!(f, "This"),
            Self::Deferred(_) => write!(f, "Deferred(<fn>)"),
            Self::Element(id) => write!(f, "Element({id:?})"),
            Self::Selector(selector) => write!(f, "Selector({selector:?})"),
        }
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Where the event posts to.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Literal path, possibly with `{name}` placeholders.
    Path(String),
    /// Handler resolved through the route registry at render time.
    Handler(Handler),
}

impl From<&str> for Endpoint {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for Endpoint {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<Handler> for Endpoint {
    fn from(handler: Handler) -> Self {
        Self::Handler(handler)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An element interaction bound to a server endpoint.
///
/// # Examples
///
/// ```ignore
/// let event = Event::click("/orders/{id}")
///     .param("id", "42")
///     .target(list_id)
///     .swap(SwapStrategy::BeforeEnd);
/// ```
#[derive(Debug, Clone)]
pub struct Event {
    pub(crate) trigger: String,
    pub(crate) target: Target,
    pub(crate) swap: Option<SwapStrategy>,
    pub(crate) endpoint: Endpoint,
    pub(crate) vals: Option<Value>,
    pub(crate) include: Option<String>,
    pub(crate) encoding: Option<String>,
    pub(crate) params: Vec<(String, String)>,
}

impl Event {
    pub fn new(trigger: impl Into<String>, endpoint: impl Into<Endpoint>) -> Self {
        Self {
            trigger: trigger.into(),
            target: Target::This,
            swap: None,
            endpoint: endpoint.into(),
            vals: None,
            include: None,
            encoding: None,
            params: Vec::new(),
        }
    }

    pub fn click(endpoint: impl Into<Endpoint>) -> Self {
        Self::new("click", endpoint)
    }

    pub fn change(endpoint: impl Into<Endpoint>) -> Self {
        Self::new("change", endpoint)
    }

    pub fn submit(endpoint: impl Into<Endpoint>) -> Self {
        Self::new("submit", endpoint)
    }

    pub fn input(endpoint: impl Into<Endpoint>) -> Self {
        Self::new("input", endpoint)
    }

    /// Where the response goes (builder). Defaults to the element itself.
    pub fn target(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    /// How the response is applied (builder). Defaults to a full replace.
    pub fn swap(mut self, swap: SwapStrategy) -> Self {
        self.swap = Some(swap);
        self
    }

    /// Extra values sent with the request (builder).
    pub fn vals(mut self, vals: Value) -> Self {
        self.vals = Some(vals);
        self
    }

    /// Selector of extra inputs to include (builder).
    pub fn include(mut self, selector: impl Into<String>) -> Self {
        self.include = Some(selector.into());
        self
    }

    /// Explicit request encoding such as `multipart/form-data` (builder).
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Value for a `{name}` placeholder in the endpoint path (builder).
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn trigger_name(&self) -> &str {
        &self.trigger
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn swap_strategy(&self) -> SwapStrategy {
        self.swap.unwrap_or_default()
    }
}
