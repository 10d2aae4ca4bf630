//! Response parsers — convert decoded raw answers into typed profile fields.
//!
//! One parser per question category, selected by the question's kind. Each
//! parser only touches its own field group; none perform I/O. Unrecognized
//! values are dropped with a debug log, never surfaced as user errors.

use tracing::debug;

use super::catalog::{QuestionDefinition, QuestionKind};
use super::model::OnboardingProfile;
use super::response::RawResponse;

/// Languages the questionnaire recognizes. Anything else is dropped.
pub const RECOGNIZED_LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Rust",
    "Go",
    "Solidity",
    "C++",
    "Java",
];

/// Apply a decoded answer to the accumulated profile.
///
/// `raw` is `None` when validation degraded the answer to nothing (or the
/// client sent no usable shape); parsers then clear or skip their fields as
/// their contract requires. `conditional_text` is the extra free-text field
/// some button questions collect.
pub fn apply_response(
    question: &QuestionDefinition,
    raw: Option<&RawResponse>,
    conditional_text: Option<&str>,
    profile: &mut OnboardingProfile,
) {
    match question.kind {
        QuestionKind::Name => profile.name = text_field(raw),
        QuestionKind::Email => profile.email = text_field(raw),
        QuestionKind::Telegram => profile.telegram = text_field(raw),
        QuestionKind::Github => profile.github = text_field(raw),
        QuestionKind::XHandle => profile.x = text_field(raw),
        QuestionKind::Portfolio => profile.portfolio = text_field(raw),
        QuestionKind::AdditionalSkills => profile.additional_skills = text_field(raw),

        QuestionKind::ToolsFamiliarity => profile.tools_familiarity = button_field(raw),
        QuestionKind::ExperienceLevel => profile.experience_level = button_field(raw),
        QuestionKind::Goal => profile.goal = button_field(raw),

        QuestionKind::Languages => parse_languages(raw, profile),
        QuestionKind::Blockchain => parse_blockchain(raw, conditional_text, profile),
        QuestionKind::Ai => parse_ai(raw, profile),
        QuestionKind::Hackathon => parse_hackathon(raw, profile),
    }
}

/// Simple text field: trimmed, empty coerced to `None`.
fn text_field(raw: Option<&RawResponse>) -> Option<String> {
    let text = raw?.text_value()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Simple button field: the pressed value, trimmed, empty coerced to `None`.
fn button_field(raw: Option<&RawResponse>) -> Option<String> {
    let value = match raw? {
        RawResponse::Selection { button_value, .. } => button_value.trim(),
        RawResponse::Text(s) => s.trim(),
        RawResponse::Multi(_) => return None,
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Filter candidate language names against the whitelist, canonicalizing case.
/// Always writes an array, possibly empty — the field is never left unset.
fn parse_languages(raw: Option<&RawResponse>, profile: &mut OnboardingProfile) {
    let candidates: Vec<String> = match raw {
        Some(RawResponse::Multi(values)) => values.clone(),
        Some(RawResponse::Selection { button_value, .. }) => vec![button_value.clone()],
        Some(RawResponse::Text(s)) => vec![s.clone()],
        None => Vec::new(),
    };

    let mut recognized = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        match RECOGNIZED_LANGUAGES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
        {
            Some(known) => {
                if !recognized.contains(&known.to_string()) {
                    recognized.push(known.to_string());
                }
            }
            None => debug!(value = %trimmed, "Dropping unrecognized language"),
        }
    }
    profile.languages = Some(recognized);
}

/// Blockchain experience + platforms. Resets both fields first so re-entry
/// after back-navigation is idempotent.
///
/// Platform sources in preference order: the confirmed multi-select values,
/// the conditional free-text (comma-separated), then the button value itself.
fn parse_blockchain(
    raw: Option<&RawResponse>,
    conditional_text: Option<&str>,
    profile: &mut OnboardingProfile,
) {
    profile.blockchain_experience = None;
    profile.blockchain_platforms = None;

    match raw {
        Some(RawResponse::Selection {
            button_value,
            selected_values,
        }) => {
            profile.blockchain_experience = Some(button_value.clone());
            let platforms = match selected_values {
                Some(values) if !values.is_empty() => values.clone(),
                _ => match conditional_text.map(split_list) {
                    Some(items) if !items.is_empty() => items,
                    _ => vec![button_value.clone()],
                },
            };
            profile.blockchain_platforms = Some(platforms);
        }
        Some(RawResponse::Multi(values)) => {
            // Alternate call shape: the array is the platforms list itself.
            profile.blockchain_platforms = Some(values.clone());
        }
        Some(RawResponse::Text(s)) => {
            profile.blockchain_experience = Some(s.trim().to_string());
        }
        None => {}
    }
}

/// AI experience. A non-empty area list is evidence of experience; a bare
/// button value is stored verbatim; anything else leaves the fields alone.
fn parse_ai(raw: Option<&RawResponse>, profile: &mut OnboardingProfile) {
    match raw {
        Some(RawResponse::Multi(areas)) if !areas.is_empty() => {
            profile.ai_experience = Some("Yes".to_string());
            profile.ai_ml_areas = Some(areas.join(", "));
        }
        Some(RawResponse::Selection { button_value, .. }) => {
            profile.ai_experience = Some(button_value.clone());
        }
        _ => {}
    }
}

/// Hackathon participation, always a list when anything was picked.
fn parse_hackathon(raw: Option<&RawResponse>, profile: &mut OnboardingProfile) {
    let values = match raw {
        Some(RawResponse::Multi(values)) => values.clone(),
        Some(RawResponse::Selection {
            button_value,
            selected_values,
        }) => match selected_values {
            Some(values) if !values.is_empty() => values.clone(),
            _ => vec![button_value.clone()],
        },
        Some(RawResponse::Text(s)) => vec![s.trim().to_string()],
        None => Vec::new(),
    };
    profile.hackathon = if values.is_empty() { None } else { Some(values) };
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
