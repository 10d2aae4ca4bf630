//! Question catalog — the fixed, ordered questionnaire.
//!
//! Pure and stateless; one catalog instance is shared across all sessions.
//! Catalog length is configuration: tests build short catalogs through
//! [`QuestionCatalog::new`], production uses [`QuestionCatalog::default_questions`].

use serde::{Deserialize, Serialize};

use super::validate::ValidationHint;

/// What raw response shapes are legal for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputMode {
    /// Free text input.
    Text,
    /// One or more predefined options.
    Buttons,
    /// Buttons, plus a free-text field required when the chosen button
    /// equals the trigger value.
    ConditionalText,
}

/// Which profile field group a question feeds. Selects the response parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Name,
    Email,
    Telegram,
    Github,
    XHandle,
    Languages,
    Blockchain,
    Ai,
    ToolsFamiliarity,
    ExperienceLevel,
    Hackathon,
    Goal,
    Portfolio,
    AdditionalSkills,
}

/// A selectable option: what the user sees, and what the wizard stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: String,
}

impl QuestionOption {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: label.to_string(),
        }
    }
}

/// One catalog entry. `index` doubles as the canonical question identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDefinition {
    pub index: usize,
    pub kind: QuestionKind,
    pub text: String,
    pub input_mode: InputMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub is_multi_select: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_trigger_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_text_input_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_hint: Option<ValidationHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt_message: Option<String>,
}

impl QuestionDefinition {
    /// A free-text question. Index is assigned by the catalog.
    pub fn text_question(kind: QuestionKind, text: &str) -> Self {
        Self {
            index: 0,
            kind,
            text: text.to_string(),
            input_mode: InputMode::Text,
            options: Vec::new(),
            is_multi_select: false,
            conditional_trigger_value: None,
            conditional_text_input_label: None,
            validation_hint: None,
            reprompt_message: None,
        }
    }

    /// A button question, single- or multi-select.
    pub fn buttons(kind: QuestionKind, text: &str, options: &[&str], multi: bool) -> Self {
        Self {
            input_mode: InputMode::Buttons,
            options: options.iter().map(|o| QuestionOption::new(o)).collect(),
            is_multi_select: multi,
            ..Self::text_question(kind, text)
        }
    }

    /// Attach a validation hint and its first-failure reprompt text.
    pub fn validated(mut self, hint: ValidationHint, reprompt: &str) -> Self {
        self.validation_hint = Some(hint);
        self.reprompt_message = Some(reprompt.to_string());
        self
    }
}

/// The ordered question list. Indices are contiguous `0..N`, enforced by
/// construction: [`QuestionCatalog::new`] renumbers entries to their position.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<QuestionDefinition>) -> Self {
        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(i, mut q)| {
                q.index = i;
                q
            })
            .collect();
        Self { questions }
    }

    /// The question at `index`, or `None` out of `[0, N)`.
    pub fn get(&self, index: usize) -> Option<&QuestionDefinition> {
        self.questions.get(index)
    }

    /// True iff `index` is the last question.
    pub fn is_final(&self, index: usize) -> bool {
        !self.questions.is_empty() && index == self.questions.len() - 1
    }

    /// Fixed total question count for this deployment.
    pub fn total_count(&self) -> usize {
        self.questions.len()
    }

    /// The production questionnaire: 14 questions, contact details first,
    /// then technical signal, then engagement.
    pub fn default_questions() -> Self {
        use QuestionKind::*;

        Self::new(vec![
            QuestionDefinition::text_question(
                Name,
                "Hey there, welcome aboard! What's your name?",
            ),
            QuestionDefinition::text_question(Email, "What's your email address?").validated(
                ValidationHint::Email,
                "That doesn't look like a valid email address. Could you double-check it? \
                 It should look like you@example.com.",
            ),
            QuestionDefinition::text_question(
                Telegram,
                "What's your Telegram handle? Leave this blank if you'd rather not share.",
            )
            .validated(
                ValidationHint::TelegramHandle,
                "Telegram handles are 5-32 characters of letters, numbers, and underscores, \
                 like @dev_handle. Mind trying again?",
            ),
            QuestionDefinition::text_question(
                Github,
                "What's your GitHub username? Leave this blank to skip.",
            )
            .validated(
                ValidationHint::GithubUsername,
                "GitHub usernames use letters, numbers, and hyphens, and can't start with a \
                 hyphen. Could you try again?",
            ),
            QuestionDefinition::text_question(
                XHandle,
                "What's your X (Twitter) handle? Leave this blank to skip.",
            )
            .validated(
                ValidationHint::XHandle,
                "X handles are up to 15 letters, numbers, or underscores, like @builder_42. \
                 Want to try again?",
            ),
            QuestionDefinition::buttons(
                Languages,
                "Which programming languages do you work with? Pick all that apply.",
                &[
                    "JavaScript",
                    "TypeScript",
                    "Python",
                    "Rust",
                    "Go",
                    "Solidity",
                    "C++",
                    "Java",
                ],
                true,
            ),
            QuestionDefinition {
                input_mode: InputMode::ConditionalText,
                options: vec![QuestionOption::new("Yes"), QuestionOption::new("No")],
                conditional_trigger_value: Some("Yes".to_string()),
                conditional_text_input_label: Some(
                    "Which platforms have you built on? (comma-separated)".to_string(),
                ),
                ..QuestionDefinition::text_question(
                    Blockchain,
                    "Have you built on blockchain platforms before?",
                )
            },
            QuestionDefinition::buttons(
                Ai,
                "Have you worked with AI or machine learning? Pick the areas you know, \
                 or \"No\" if you're new to it.",
                &[
                    "LLMs / GenAI",
                    "Machine learning",
                    "Computer vision",
                    "Data science",
                    "No",
                ],
                true,
            ),
            QuestionDefinition::buttons(
                ToolsFamiliarity,
                "How familiar are you with Web3 developer tooling?",
                &["Very familiar", "Some experience", "Not familiar"],
                false,
            ),
            QuestionDefinition::buttons(
                ExperienceLevel,
                "How would you rate your overall development experience?",
                &["Beginner", "Intermediate", "Advanced"],
                false,
            ),
            QuestionDefinition::buttons(
                Hackathon,
                "Have you taken part in hackathons? Pick all that apply.",
                &["Winner", "Web3", "Web2", "Not yet"],
                true,
            ),
            QuestionDefinition::buttons(
                Goal,
                "What brings you to the community?",
                &[
                    "Build apps/dApps",
                    "Earn bounties",
                    "Share ideas for new features",
                    "Work on AI projects",
                    "Promote blockchain/Andromeda",
                    "Learn Web3 basics",
                ],
                false,
            ),
            QuestionDefinition::text_question(
                Portfolio,
                "Share a link to your portfolio or a project you're proud of. \
                 Leave this blank to skip.",
            ),
            QuestionDefinition::text_question(
                AdditionalSkills,
                "Anything else you'd like us to know — other skills, interests, ideas? \
                 Leave this blank to finish.",
            ),
        ])
    }
}
