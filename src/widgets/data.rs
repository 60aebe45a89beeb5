//! Read-only display of structured data.
//!
//! Objects render as cards with one row per key; nested objects and arrays
//! collapse under their key. Scalars are shown as text.

use serde::Serialize;
use serde_json::Value;

use crate::element::{ElementMut, ElementSpec};
use crate::error::{Result, UiError};
use crate::frame::Frame;

const CARD_CLASSES: &str = "card w-96 bg-base-100 shadow-md w-full mb-5";
const ROW_CLASSES: &str = "flex flex-row flex-wrap gap-2";

/// A `div` showing a JSON object or array.
pub struct Dict<'f> {
    inner: ElementMut<'f>,
}

element_widget!(Dict);

impl<'f> Dict<'f> {
    /// Build the display for `data`.
    ///
    /// Fails with [`UiError::InvalidData`] before touching the frame when
    /// `data` is null, empty or a bare scalar.
    pub fn new(frame: &'f mut Frame, data: &Value) -> Result<Self> {
        match data {
            Value::Null => return Err(UiError::InvalidData("data cannot be null".to_owned())),
            Value::Object(map) if map.is_empty() => {
                return Err(UiError::InvalidData("data cannot be empty".to_owned()))
            }
            Value::Array(items) if items.is_empty() => {
                return Err(UiError::InvalidData("data cannot be empty".to_owned()))
            }
            Value::Object(_) | Value::Array(_) => {}
            _ => {
                return Err(UiError::InvalidData(
                    "data must be an object or an array".to_owned(),
                ))
            }
        }

        let mut inner = frame.create(ElementSpec::new("div"));
        inner.within(|frame| generate(frame, data));
        Ok(Self { inner })
    }
}

/// Serialize `value` and show it as a [`Dict`].
pub fn show<'f, T: Serialize + ?Sized>(frame: &'f mut Frame, value: &T) -> Result<Dict<'f>> {
    let data = serde_json::to_value(value)?;
    Dict::new(frame, &data)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn generate(frame: &mut Frame, value: &Value) {
    match value {
        Value::Object(map) => {
            frame.element("div").classes(CARD_CLASSES).within(|frame| {
                for (key, value) in map {
                    frame
                        .element("div")
                        .classes(ROW_CLASSES)
                        .within(|frame| entry(frame, key, value));
                }
            });
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) => generate(frame, item),
                    other => {
                        frame.text("div", &scalar_text(other));
                    }
                }
            }
        }
        scalar => {
            frame
                .text("div", &scalar_text(scalar))
                .classes("text-primary");
        }
    }
}

fn entry(frame: &mut Frame, key: &str, value: &Value) {
    let label = format!("{key}:");
    if matches!(value, Value::Object(_) | Value::Array(_)) {
        frame
            .element("div")
            .classes("collapse collapse-arrow pl-2")
            .within(|frame| {
                frame
                    .element("input")
                    .attr("type", "checkbox")
                    .attr("checked", "checked");
                frame
                    .text("div", &label)
                    .classes("collapse-title text-sm min-h-8 p-0");
                frame
                    .element("div")
                    .classes("collapse-content")
                    .within(|frame| generate(frame, value));
            });
    } else {
        frame.text("div", &label).classes("pl-2");
        frame
            .text("p", &scalar_text(value))
            .classes("text-primary pl-2");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
