use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("correct index {index} is out of range for {options} options")]
    CorrectIndexOutOfRange { index: usize, options: usize },
}

//
// ─── LEVEL & TIME BUDGET ───────────────────────────────────────────────────────
//

/// Difficulty tier of a question. Determines its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Parses a level label. Unknown labels fall back to `Easy`.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medium" => Level::Medium,
            "hard" => Level::Hard,
            _ => Level::Easy,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    /// Whole seconds allotted to a question of this level.
    #[must_use]
    pub fn budget_secs(self) -> u32 {
        TimeBudget::STANDARD.for_level(self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-level countdown length in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    easy: u32,
    medium: u32,
    hard: u32,
}

impl TimeBudget {
    pub const STANDARD: TimeBudget = TimeBudget {
        easy: 20,
        medium: 60,
        hard: 120,
    };

    #[must_use]
    pub fn for_level(&self, level: Level) -> u32 {
        match level {
            Level::Easy => self.easy,
            Level::Medium => self.medium,
            Level::Hard => self.hard,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice question.
///
/// `correct_index` is `None` for questions without a defined answer; such
/// questions are still asked and recorded, but score neither right nor wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    level: Level,
    text: String,
    options: Vec<String>,
    correct_index: Option<usize>,
    explanation: String,
}

impl Question {
    /// Builds a well-formed question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` for blank text,
    /// `QuestionError::TooFewOptions` for fewer than two options and
    /// `QuestionError::CorrectIndexOutOfRange` when the answer index does not
    /// point at an option.
    pub fn new(
        id: QuestionId,
        level: Level,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: Option<usize>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        if let Some(index) = correct_index.filter(|index| *index >= options.len()) {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            level,
            text,
            options,
            correct_index,
            explanation: String::new(),
        })
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.level.budget_secs()
    }
}

//
// ─── LENIENT INPUT ─────────────────────────────────────────────────────────────
//

/// Loosely-typed question as it arrives from a question file.
///
/// Conversion never fails: an unknown level becomes `Easy`, missing options
/// become an empty list and an unusable correct index becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: u64,
    #[serde(default)]
    pub level: String,
    #[serde(alias = "question")]
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_index: Option<i64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn into_question(self) -> Question {
        let options = self.options.unwrap_or_default();
        let correct_index = self
            .correct_index
            .and_then(|raw| usize::try_from(raw).ok())
            .filter(|index| *index < options.len());

        Question {
            id: QuestionId::new(self.id),
            level: Level::parse_or_default(&self.level),
            text: self.text,
            options,
            correct_index,
            explanation: self.explanation.unwrap_or_default(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn budgets_match_levels() {
        assert_eq!(Level::Easy.budget_secs(), 20);
        assert_eq!(Level::Medium.budget_secs(), 60);
        assert_eq!(Level::Hard.budget_secs(), 120);
    }

    #[test]
    fn unknown_level_falls_back_to_easy() {
        assert_eq!(Level::parse_or_default("HARD"), Level::Hard);
        assert_eq!(Level::parse_or_default("expert"), Level::Easy);
        assert_eq!(Level::parse_or_default(""), Level::Easy);
    }

    #[test]
    fn strict_constructor_rejects_single_option() {
        let err = Question::new(QuestionId::new(1), Level::Easy, "Q", opts(&["a"]), None)
            .unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { count: 1 });
    }

    #[test]
    fn strict_constructor_rejects_out_of_range_answer() {
        let err = Question::new(
            QuestionId::new(1),
            Level::Easy,
            "Q",
            opts(&["a", "b"]),
            Some(2),
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::CorrectIndexOutOfRange { index: 2, .. }));
    }

    #[test]
    fn draft_degrades_malformed_fields() {
        let draft = QuestionDraft {
            id: 9,
            level: "legendary".into(),
            text: "What?".into(),
            options: None,
            correct_index: Some(3),
            explanation: None,
        };
        let q = draft.into_question();
        assert_eq!(q.level(), Level::Easy);
        assert!(q.options().is_empty());
        assert_eq!(q.correct_index(), None);
        assert_eq!(q.explanation(), "");
    }

    #[test]
    fn draft_parses_from_camel_case_json() {
        let raw = r#"{"id":1,"level":"medium","question":"Sqrt of 256?","options":["14","16"],"correctIndex":1}"#;
        let draft: QuestionDraft = serde_json::from_str(raw).unwrap();
        let q = draft.into_question();
        assert_eq!(q.level(), Level::Medium);
        assert_eq!(q.correct_index(), Some(1));
        assert_eq!(q.budget_secs(), 60);
    }

    #[test]
    fn negative_correct_index_is_dropped() {
        let draft = QuestionDraft {
            id: 2,
            level: "easy".into(),
            text: "Q".into(),
            options: Some(opts(&["a", "b"])),
            correct_index: Some(-1),
            explanation: Some("none".into()),
        };
        assert_eq!(draft.into_question().correct_index(), None);
    }
}
