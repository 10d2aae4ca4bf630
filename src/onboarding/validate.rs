//! Input validation — per-hint predicates for accept/reprompt decisions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Symbolic name selecting a validation rule on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationHint {
    Email,
    GithubUsername,
    TelegramHandle,
    XHandle,
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Shape check for the one hard-required field. Also used as the profile
/// persistence precondition.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Validates raw answers against a question's hint.
///
/// Regexes are compiled once at construction; one validator is shared across
/// all sessions. Never mutates state and never fails — absence of a rule is
/// acceptance.
pub struct Validator {
    github: Regex,
    telegram: Regex,
    x: Regex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            // Alphanumeric and hyphens, no leading hyphen, max 39 chars.
            github: Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").unwrap(),
            // Optional leading @, then 5-32 word characters.
            telegram: Regex::new(r"^@?[A-Za-z0-9_]{5,32}$").unwrap(),
            // Optional leading @, then up to 15 word characters.
            x: Regex::new(r"^@?[A-Za-z0-9_]{1,15}$").unwrap(),
        }
    }

    /// Check a raw text answer against a question's validation hint.
    ///
    /// Email is required: empty or absent input is invalid. The handle
    /// fields are optional: empty or absent input passes, present input
    /// must match the platform's constraints.
    pub fn validate(&self, response: Option<&str>, hint: Option<ValidationHint>) -> bool {
        let Some(hint) = hint else {
            return true;
        };
        let trimmed = response.map(str::trim).unwrap_or_default();

        match hint {
            ValidationHint::Email => is_valid_email(trimmed),
            ValidationHint::GithubUsername => trimmed.is_empty() || self.github.is_match(trimmed),
            ValidationHint::TelegramHandle => {
                trimmed.is_empty() || self.telegram.is_match(trimmed)
            }
            ValidationHint::XHandle => trimmed.is_empty() || self.x.is_match(trimmed),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
