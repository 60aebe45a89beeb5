//! Ordered, unique-key attribute map.
//!
//! Values are stored unescaped and escaped once, at serialization time.

use std::fmt;
use std::sync::Arc;

use crate::html::escape;

/// Closure that produces an attribute value when the element renders.
pub type Deferred = Arc<dyn Fn() -> String + Send + Sync>;

// ---------------------------------------------------------------------------
// AttrValue
// ---------------------------------------------------------------------------

/// The value side of an attribute.
#[derive(Clone)]
pub enum AttrValue {
    /// Plain text, escaped on output.
    Text(String),
    /// Evaluated at render time, then escaped.
    Deferred(Deferred),
    /// A valueless attribute such as `checked` or `disabled`.
    Flag,
}

impl AttrValue {
    /// The text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Resolve to the string that would be written, if any.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Deferred(f) => Some(f()),
            Self::Flag => None,
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "Text({text:?})"),
            Self::Deferred(_) => write!(f, "Deferred(<fn>)"),
            Self::Flag => write!(f, "Flag"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Text(if value { "true" } else { "false" }.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Attributes in insertion order. Setting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, keeping its original position if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set a valueless attribute.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.set(key, AttrValue::Flag);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The plain-text value of `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append ` key="value"` pairs to `out`.
    pub fn write_html(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push(' ');
            out.push_str(key);
            if let Some(text) = value.resolve() {
                out.push_str("=\"");
                out.push_str(&escape(&text));
                out.push('"');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(attrs: &Attributes) -> String {
        let mut out = String::new();
        attrs.write_html(&mut out);
        out
    }

    #[test]
    fn keeps_insertion_order() {
        let mut attrs = Attributes::new();
        attrs.set("id", "a-0");
        attrs.set("class", "btn");
        attrs.set("name", "x");
        assert_eq!(html(&attrs), r#" id="a-0" class="btn" name="x""#);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.set("id", "a-0");
        attrs.set("class", "one");
        attrs.set("id", "a-9");
        assert_eq!(attrs.len(), 2);
        assert_eq!(html(&attrs), r#" id="a-9" class="one""#);
    }

    #[test]
    fn values_are_escaped() {
        let mut attrs = Attributes::new();
        attrs.set("hx-vals", r#"{"a": "<b>"}"#);
        assert_eq!(
            html(&attrs),
            r#" hx-vals="{&quot;a&quot;: &quot;&lt;b&gt;&quot;}""#
        );
    }

    #[test]
    fn flags_have_no_value() {
        let mut attrs = Attributes::new();
        attrs.set("type", "checkbox");
        attrs.set_flag("checked");
        assert_eq!(html(&attrs), r#" type="checkbox" checked"#);
    }

    #[test]
    fn deferred_evaluated_on_write() {
        let mut attrs = Attributes::new();
        attrs.set("data-x", AttrValue::Deferred(Arc::new(|| "late".to_owned())));
        assert!(attrs.text("data-x").is_none());
        assert_eq!(html(&attrs), r#" data-x="late""#);
    }

    #[test]
    fn bools_lowercase() {
        let mut attrs = Attributes::new();
        attrs.set("aria-hidden", true);
        assert_eq!(attrs.text("aria-hidden"), Some("true"));
    }

    #[test]
    fn remove() {
        let mut attrs = Attributes::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        assert!(attrs.remove("a").is_some());
        assert!(attrs.remove("a").is_none());
        assert!(!attrs.contains("a"));
        assert_eq!(html(&attrs), r#" b="2""#);
    }
}
