//! Path determination — maps a completed profile to a community path.
//!
//! A pure rule cascade evaluated top to bottom, first match wins, with an
//! unconditional fallback. It never fails: a missing URL configuration
//! resolves to a deterministic derived link.

use serde::{Deserialize, Serialize};

use crate::config::PathLinks;

use super::model::OnboardingProfile;

/// The recommended community paths, ordered by rule precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunityPath {
    Contractor,
    Hacker,
    Visionary,
    AiInitiatives,
    Ambassador,
    Explorer,
}

impl CommunityPath {
    /// The user-facing path name, also the URL-configuration key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contractor => "Contractor",
            Self::Hacker => "Hacker",
            Self::Visionary => "Visionary",
            Self::AiInitiatives => "AI Initiatives",
            Self::Ambassador => "Ambassador",
            Self::Explorer => "Explorer",
        }
    }
}

impl std::fmt::Display for CommunityPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The completion payload: path name plus its landing URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRecommendation {
    pub recommended_path: String,
    pub recommended_path_url: String,
}

const CONTRACTOR_LANGUAGES: &[&str] = &["Rust", "Solidity", "Python"];
const HACKER_SIGNALS: &[&str] = &["Winner", "Web2", "Web3"];

/// Evaluate the rule cascade. Total: every profile yields a path.
pub fn determine(profile: &OnboardingProfile) -> CommunityPath {
    let goal = profile.goal.as_deref();
    let level = profile.experience_level.as_deref();
    let tools = profile.tools_familiarity.as_deref();
    let tools_hands_on = matches!(tools, Some("Very familiar") | Some("Some experience"));

    let knows_contractor_language = profile
        .languages
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|lang| CONTRACTOR_LANGUAGES.contains(&lang.as_str()));

    if knows_contractor_language
        && tools_hands_on
        && level == Some("Advanced")
        && goal == Some("Build apps/dApps")
    {
        return CommunityPath::Contractor;
    }

    let hackathon_signal = profile
        .hackathon
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|h| HACKER_SIGNALS.contains(&h.as_str()));

    if tools_hands_on && hackathon_signal && goal == Some("Earn bounties") {
        return CommunityPath::Hacker;
    }

    if goal == Some("Share ideas for new features")
        && matches!(level, Some("Beginner") | Some("Intermediate"))
    {
        return CommunityPath::Visionary;
    }

    if profile.ai_experience.as_deref() == Some("Yes") && goal == Some("Work on AI projects") {
        return CommunityPath::AiInitiatives;
    }

    if profile.blockchain_experience.as_deref() == Some("Yes")
        && goal == Some("Promote blockchain/Andromeda")
    {
        return CommunityPath::Ambassador;
    }

    if goal == Some("Learn Web3 basics") || level == Some("Beginner") {
        return CommunityPath::Explorer;
    }

    CommunityPath::Explorer
}

/// Determine the path and resolve its URL.
pub fn recommend(profile: &OnboardingProfile, links: &PathLinks) -> PathRecommendation {
    let path = determine(profile);
    PathRecommendation {
        recommended_path: path.name().to_string(),
        recommended_path_url: links.url_for(path.name()),
    }
}
