//! Flex rows and columns.

use crate::element::style::StyleSpec;
use crate::element::{ElementMut, ElementSpec};
use crate::frame::Frame;

/// Join class fragments, dropping empty ones.
fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// Options of a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOptions {
    pub wrap: String,
    pub item_position: String,
    pub gap: String,
    pub padding: String,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            wrap: "flex-wrap".to_owned(),
            item_position: "items-start".to_owned(),
            gap: "gap-4".to_owned(),
            padding: String::new(),
        }
    }
}

/// Children laid out horizontally.
pub struct Row<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Row);

impl<'f> Row<'f> {
    pub fn new(frame: &'f mut Frame) -> Self {
        Self::with_options(frame, &RowOptions::default())
    }

    pub fn with_options(frame: &'f mut Frame, options: &RowOptions) -> Self {
        let base = join(&[
            "flex flex-row",
            &options.wrap,
            &options.item_position,
            &options.gap,
            &options.padding,
        ]);
        let spec = ElementSpec::new("div").style(StyleSpec::owned(base));
        Self {
            inner: frame.create(spec),
        }
    }
}

// ---------------------------------------------------------------------------
// Col
// ---------------------------------------------------------------------------

/// Options of a [`Col`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColOptions {
    pub item_position: String,
    pub gap: String,
    pub padding: String,
}

impl Default for ColOptions {
    fn default() -> Self {
        Self {
            item_position: "items-start".to_owned(),
            gap: "gap-4".to_owned(),
            padding: "p-4".to_owned(),
        }
    }
}

/// Children laid out vertically.
pub struct Col<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Col);

impl<'f> Col<'f> {
    pub fn new(frame: &'f mut Frame) -> Self {
        Self::with_options(frame, &ColOptions::default())
    }

    pub fn with_options(frame: &'f mut Frame, options: &ColOptions) -> Self {
        let base = join(&[
            "flex flex-col",
            &options.item_position,
            &options.gap,
            &options.padding,
        ]);
        let spec = ElementSpec::new("div").style(StyleSpec::owned(base));
        Self {
            inner: frame.create(spec),
        }
    }
}
