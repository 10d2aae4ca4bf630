//! Raw answer shapes and their decoding.
//!
//! The turn endpoint accepts three response shapes: a plain string, a
//! `{buttonValue, selectedValues?}` object, and an array of strings. Which
//! shapes are legal is decided in one place, keyed by the question's
//! declared input mode, instead of per-parser runtime type checks.

use serde::Deserialize;
use serde_json::Value;

use super::catalog::{InputMode, QuestionDefinition};

/// A decoded raw answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// Free text.
    Text(String),
    /// A button press, optionally carrying the confirmed multi-select values.
    Selection {
        button_value: String,
        selected_values: Option<Vec<String>>,
    },
    /// A bare multi-select submission.
    Multi(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionBody {
    button_value: String,
    #[serde(default)]
    selected_values: Option<Vec<String>>,
}

impl RawResponse {
    /// Decode a request's `response` value against the question it answers.
    ///
    /// Returns `None` for an absent answer or a shape the question's input
    /// mode does not admit; the caller treats both as "no answer". Never
    /// panics on malformed input.
    pub fn decode(value: Option<&Value>, question: &QuestionDefinition) -> Option<Self> {
        let value = value?;
        if value.is_null() {
            return None;
        }

        match question.input_mode {
            InputMode::Text => value.as_str().map(|s| Self::Text(s.to_string())),
            InputMode::Buttons | InputMode::ConditionalText => match value {
                Value::String(s) => Some(Self::Selection {
                    button_value: s.clone(),
                    selected_values: None,
                }),
                Value::Array(items) => {
                    let values: Vec<String> = items
                        .iter()
                        .filter_map(|v| v.as_str().map(String::from))
                        .collect();
                    Some(Self::Multi(values))
                }
                Value::Object(_) => serde_json::from_value::<SelectionBody>(value.clone())
                    .ok()
                    .map(|body| Self::Selection {
                        button_value: body.button_value,
                        selected_values: body.selected_values,
                    }),
                _ => None,
            },
        }
    }

    /// The free-text content, if this answer has one. Used by validation,
    /// which only applies to text questions.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}
