use interview_core::model::{DetailedResult, ResultId};
use storage::repository::ResultRecord;

use crate::vm::candidate_vm::display_name;
use crate::vm::time_fmt::format_datetime;

/// One line of the results table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub id: ResultId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub score: String,
    pub attempted: u32,
    pub correct: u32,
    pub taken_at_str: String,
}

impl From<&ResultRecord> for ResultRowVm {
    fn from(record: &ResultRecord) -> Self {
        Self {
            id: record.id,
            name: display_name(record.name()),
            email: record.email().to_owned(),
            phone: record.phone().to_owned(),
            score: format!("{} / {}", record.score, record.total),
            attempted: record.attempted,
            correct: record.correct,
            taken_at_str: format_datetime(record.taken_at),
        }
    }
}

#[must_use]
pub fn map_result_rows(records: &[ResultRecord]) -> Vec<ResultRowVm> {
    records.iter().map(ResultRowVm::from).collect()
}

/// What a returning candidate sees instead of a new assessment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendedNoticeVm {
    pub id: ResultId,
    pub message: String,
    pub details: String,
    pub show_hint: String,
}

impl From<&ResultRecord> for AttendedNoticeVm {
    fn from(record: &ResultRecord) -> Self {
        Self {
            id: record.id,
            message: "You have already attended this interview.".to_owned(),
            details: format!(
                "{} scored {}/{} on {}",
                record.email(),
                record.score,
                record.total,
                format_datetime(record.taken_at)
            ),
            show_hint: format!("app show {}", record.id),
        }
    }
}

/// One answered question in the review screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub question: String,
    pub verdict: &'static str,
    pub time_taken: String,
    pub your_answer: String,
    pub correct_answer: String,
    /// Shown only for questions not answered correctly.
    pub solution: Option<String>,
}

impl ReviewRowVm {
    #[must_use]
    pub fn new(number: usize, detail: &DetailedResult) -> Self {
        let is_correct = detail.is_correct();
        let solution = (!is_correct).then(|| {
            if detail.explanation.trim().is_empty() {
                "No explanation provided.".to_owned()
            } else {
                detail.explanation.clone()
            }
        });

        Self {
            number,
            question: detail.question_text.clone(),
            verdict: if is_correct { "Correct" } else { "Wrong" },
            time_taken: format!("{}s", detail.time_taken_secs),
            your_answer: detail.selected_option().unwrap_or("No answer").to_owned(),
            correct_answer: detail.correct_option().unwrap_or("N/A").to_owned(),
            solution,
        }
    }
}

/// Full review of one stored result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultDetailVm {
    pub heading: String,
    pub rows: Vec<ReviewRowVm>,
}

impl From<&ResultRecord> for ResultDetailVm {
    fn from(record: &ResultRecord) -> Self {
        Self {
            heading: format!(
                "Result: {} - {}/{}",
                display_name(record.name()),
                record.score,
                record.total
            ),
            rows: record
                .detailed
                .iter()
                .enumerate()
                .map(|(i, d)| ReviewRowVm::new(i + 1, d))
                .collect(),
        }
    }
}

/// Pretty JSON of the per-question details, for export.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn detailed_json(record: &ResultRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&record.detailed)
}
