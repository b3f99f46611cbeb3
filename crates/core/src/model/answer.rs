use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// What the candidate did with one question.
///
/// Snapshots the question text and options so a record stays readable after
/// the question list is gone. Records are created once, at submission, and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub options: Vec<String>,
    pub selected_index: Option<usize>,
    pub correct_index: Option<usize>,
    pub explanation: String,
    pub time_taken_secs: u32,
}

impl AnswerRecord {
    #[must_use]
    pub fn is_attempted(&self) -> bool {
        self.selected_index.is_some()
    }

    /// `None` when the question has no defined answer.
    ///
    /// A missing selection never matches, so unanswered questions with a
    /// defined answer judge as `Some(false)`.
    #[must_use]
    pub fn judge(&self) -> Option<bool> {
        self.correct_index
            .map(|correct| self.selected_index == Some(correct))
    }
}

//
// ─── DETAILED RESULT ───────────────────────────────────────────────────────────
//

/// Report line for one question: the record plus its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedResult {
    pub question_id: QuestionId,
    pub question_text: String,
    pub options: Vec<String>,
    pub selected_index: Option<usize>,
    pub correct_index: Option<usize>,
    pub correct: Option<bool>,
    pub explanation: String,
    pub time_taken_secs: u32,
}

impl DetailedResult {
    #[must_use]
    pub fn from_record(record: AnswerRecord) -> Self {
        let correct = record.judge();
        Self {
            question_id: record.question_id,
            question_text: record.question_text,
            options: record.options,
            selected_index: record.selected_index,
            correct_index: record.correct_index,
            correct,
            explanation: record.explanation,
            time_taken_secs: record.time_taken_secs,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct == Some(true)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(selected: Option<usize>, correct: Option<usize>) -> AnswerRecord {
        AnswerRecord {
            question_id: QuestionId::new(1),
            question_text: "Binary of decimal 15?".into(),
            options: vec!["1110".into(), "1111".into()],
            selected_index: selected,
            correct_index: correct,
            explanation: String::new(),
            time_taken_secs: 3,
        }
    }

    #[test]
    fn judge_covers_all_cases() {
        assert_eq!(record(Some(1), Some(1)).judge(), Some(true));
        assert_eq!(record(Some(0), Some(1)).judge(), Some(false));
        assert_eq!(record(None, Some(1)).judge(), Some(false));
        assert_eq!(record(Some(0), None).judge(), None);
        assert_eq!(record(None, None).judge(), None);
    }

    #[test]
    fn detailed_result_exposes_option_texts() {
        let detailed = DetailedResult::from_record(record(Some(0), Some(1)));
        assert_eq!(detailed.selected_option(), Some("1110"));
        assert_eq!(detailed.correct_option(), Some("1111"));
        assert!(!detailed.is_correct());
    }
}
