//! Onboarding profile data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile accumulated across the conversation, one field group per question.
///
/// Everything is optional while the conversation runs; `email` is the only
/// field the controller hard-requires before the profile may be persisted.
/// The `recommended_*` and `created_at` fields are set at completion only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Recognized languages only; unrecognized submissions are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_experience: Option<String>,
    /// Comma-joined list of AI/ML areas, as submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_ml_areas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_familiarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hackathon: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_skills: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_path_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Flattened, column-shaped projection of a completed profile.
///
/// Renames `x` to `x_handle`, keeps `hackathon` as array-or-null, and
/// carries no session identifier. One record per unique email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub name: Option<String>,
    pub email: String,
    pub telegram: Option<String>,
    pub github: Option<String>,
    pub x_handle: Option<String>,
    pub languages: Vec<String>,
    pub blockchain_experience: Option<String>,
    pub blockchain_platforms: Option<Vec<String>>,
    pub ai_experience: Option<String>,
    pub ai_ml_areas: Option<String>,
    pub tools_familiarity: Option<String>,
    pub experience_level: Option<String>,
    pub hackathon: Option<Vec<String>>,
    pub goal: Option<String>,
    pub portfolio: Option<String>,
    pub additional_skills: Option<String>,
    pub recommended_path: Option<String>,
    pub recommended_path_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PersistedRecord {
    /// Project a completed profile into the persisted shape.
    ///
    /// Returns `None` when the profile has no email — such a profile is not
    /// eligible for persistence.
    pub fn from_profile(profile: &OnboardingProfile) -> Option<Self> {
        let email = profile.email.clone()?;
        Some(Self {
            name: profile.name.clone(),
            email,
            telegram: profile.telegram.clone(),
            github: profile.github.clone(),
            x_handle: profile.x.clone(),
            languages: profile.languages.clone().unwrap_or_default(),
            blockchain_experience: profile.blockchain_experience.clone(),
            blockchain_platforms: profile.blockchain_platforms.clone(),
            ai_experience: profile.ai_experience.clone(),
            ai_ml_areas: profile.ai_ml_areas.clone(),
            tools_familiarity: profile.tools_familiarity.clone(),
            experience_level: profile.experience_level.clone(),
            hackathon: profile
                .hackathon
                .as_ref()
                .filter(|h| !h.is_empty())
                .cloned(),
            goal: profile.goal.clone(),
            portfolio: profile.portfolio.clone(),
            additional_skills: profile.additional_skills.clone(),
            recommended_path: profile.recommended_path.clone(),
            recommended_path_url: profile.recommended_path_url.clone(),
            created_at: profile.created_at,
        })
    }
}
