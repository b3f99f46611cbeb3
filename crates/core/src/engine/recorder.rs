use chrono::{DateTime, Utc};

use crate::model::{AnswerRecord, Question};
use crate::time::rounded_secs_between;

/// Append-only log of answers for one session, in question order.
#[derive(Debug, Default)]
pub struct AnswerRecorder {
    records: Vec<AnswerRecord>,
}

impl AnswerRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `question` with the given selection and append it.
    ///
    /// Time taken is measured from `activated_at` to `now`, rounded to whole
    /// seconds and clamped into `[0, budget]`.
    pub fn record(
        &mut self,
        question: &Question,
        selected: Option<usize>,
        activated_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> &AnswerRecord {
        let record = AnswerRecord {
            question_id: question.id(),
            question_text: question.text().to_owned(),
            options: question.options().to_vec(),
            selected_index: selected,
            correct_index: question.correct_index(),
            explanation: question.explanation().to_owned(),
            time_taken_secs: clamped_time_taken(question, activated_at, now),
        };
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<AnswerRecord> {
        std::mem::take(&mut self.records)
    }
}

fn clamped_time_taken(question: &Question, activated_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let budget = question.budget_secs();
    let elapsed = rounded_secs_between(activated_at, now).clamp(0, i64::from(budget));
    u32::try_from(elapsed).unwrap_or(budget)
}
