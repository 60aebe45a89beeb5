//! Base classes and size tokens.
//!
//! An element kind may declare a fixed base class string and a size template
//! such as `"btn-{size}"`. The class attribute is rebuilt from the base on
//! every [`Style::apply_classes`] call; the size token is swapped in place by
//! exact substring replacement.

use std::borrow::Cow;
use std::fmt;

use crate::dom::Attributes;

/// Placeholder replaced by the size name in a size template.
const SIZE_PLACEHOLDER: &str = "{size}";

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Size names understood by sized element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Size {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StyleSpec
// ---------------------------------------------------------------------------

/// Fixed styling declared by an element kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSpec {
    pub base: Cow<'static, str>,
    pub size_format: Option<&'static str>,
}

impl StyleSpec {
    /// Base classes with no size template.
    pub const fn plain(base: &'static str) -> Self {
        Self {
            base: Cow::Borrowed(base),
            size_format: None,
        }
    }

    /// Base classes plus a size template containing `{size}`.
    pub const fn sized(base: &'static str, size_format: &'static str) -> Self {
        Self {
            base: Cow::Borrowed(base),
            size_format: Some(size_format),
        }
    }

    /// Base classes computed at construction (e.g. a column count).
    pub fn owned(base: String) -> Self {
        Self {
            base: Cow::Owned(base),
            size_format: None,
        }
    }

    fn size_token(&self, size: Size) -> Option<String> {
        self.size_format
            .map(|format| format.replace(SIZE_PLACEHOLDER, size.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Per-element styling state.
#[derive(Debug, Clone, Default)]
pub struct Style {
    spec: StyleSpec,
    size: Option<Size>,
}

impl Style {
    pub fn new(spec: StyleSpec) -> Self {
        Self { spec, size: None }
    }

    pub fn spec(&self) -> &StyleSpec {
        &self.spec
    }

    /// The size token currently applied, if any.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Set the class attribute to the base classes followed by `input`.
    ///
    /// An empty result leaves the attribute untouched. The applied size token
    /// is re-applied afterwards; a sized kind starts at [`Size::default`].
    pub fn apply_classes(&mut self, attrs: &mut Attributes, input: &str) {
        let base = self.spec.base.trim();
        let input = input.trim();
        let class = match (base.is_empty(), input.is_empty()) {
            (true, _) => input.to_owned(),
            (false, true) => base.to_owned(),
            (false, false) => format!("{base} {input}"),
        };
        if class.is_empty() {
            return;
        }
        attrs.set("class", class);
        let size = match self.size.take() {
            Some(size) => Some(size),
            None => self.spec.size_format.map(|_| Size::default()),
        };
        if let Some(size) = size {
            self.apply_size(attrs, size);
        }
    }

    /// Swap the size token in the class attribute for the one of `size`.
    ///
    /// Kinds without a size template only record the size.
    pub fn apply_size(&mut self, attrs: &mut Attributes, size: Size) {
        let Some(new_token) = self.spec.size_token(size) else {
            self.size = Some(size);
            return;
        };
        let old_token = self.spec.size_token(self.size.unwrap_or_default());
        let current = attrs.text("class").unwrap_or_default().to_owned();

        let class = match old_token {
            Some(old) if current.contains(old.as_str()) => current.replacen(&old, &new_token, 1),
            _ if current.is_empty() => new_token,
            _ => format!("{current} {new_token}"),
        };
        attrs.set("class", class);
        self.size = Some(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(attrs: &Attributes) -> &str {
        attrs.text("class").unwrap_or_default()
    }

    #[test]
    fn classes_seed_from_base() {
        let mut style = Style::new(StyleSpec::plain("card"));
        let mut attrs = Attributes::new();
        style.apply_classes(&mut attrs, "");
        assert_eq!(class(&attrs), "card");
        style.apply_classes(&mut attrs, "shadow");
        assert_eq!(class(&attrs), "card shadow");
        // Rebuilt from the base, not accumulated.
        style.apply_classes(&mut attrs, "border");
        assert_eq!(class(&attrs), "card border");
    }

    #[test]
    fn empty_base_and_input_leaves_no_class() {
        let mut style = Style::default();
        let mut attrs = Attributes::new();
        style.apply_classes(&mut attrs, "  ");
        assert!(!attrs.contains("class"));
    }

    #[test]
    fn size_appends_then_replaces() {
        let mut style = Style::new(StyleSpec::sized("btn", "btn-{size}"));
        let mut attrs = Attributes::new();
        style.apply_classes(&mut attrs, "");
        style.apply_size(&mut attrs, Size::Sm);
        assert_eq!(class(&attrs), "btn btn-sm");
        style.apply_size(&mut attrs, Size::Lg);
        assert_eq!(class(&attrs), "btn btn-lg");
        assert_eq!(style.size(), Some(Size::Lg));
    }

    #[test]
    fn sized_kind_starts_at_default_size() {
        let mut style = Style::new(StyleSpec::sized("btn", "btn-{size}"));
        let mut attrs = Attributes::new();
        style.apply_classes(&mut attrs, "");
        assert_eq!(class(&attrs), "btn btn-md");
        assert_eq!(style.size(), Some(Size::Md));
        style.apply_classes(&mut attrs, "wide");
        assert_eq!(class(&attrs), "btn wide btn-md");
    }

    #[test]
    fn size_on_empty_class() {
        let mut style = Style::new(StyleSpec::sized("", "input-{size}"));
        let mut attrs = Attributes::new();
        style.apply_size(&mut attrs, Size::Xs);
        assert_eq!(class(&attrs), "input-xs");
    }

    #[test]
    fn classes_keep_applied_size() {
        let mut style = Style::new(StyleSpec::sized("btn", "btn-{size}"));
        let mut attrs = Attributes::new();
        style.apply_size(&mut attrs, Size::Xl);
        style.apply_classes(&mut attrs, "btn-primary");
        assert_eq!(class(&attrs), "btn btn-primary btn-xl");
    }

    #[test]
    fn plain_kind_records_size_only() {
        let mut style = Style::new(StyleSpec::plain("row"));
        let mut attrs = Attributes::new();
        style.apply_classes(&mut attrs, "");
        style.apply_size(&mut attrs, Size::Lg);
        assert_eq!(class(&attrs), "row");
        assert_eq!(style.size(), Some(Size::Lg));
    }
}
