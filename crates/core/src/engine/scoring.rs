use crate::model::{AnswerRecord, Candidate, DetailedResult, SessionReport, count};

/// Reduce a session's answers into its report.
///
/// Pure and infallible: a record whose question had no correct index simply
/// carries `correct = None` and does not count towards the score.
#[must_use]
pub fn finalize(candidate: Candidate, answers: Vec<AnswerRecord>, total: usize) -> SessionReport {
    let detailed: Vec<DetailedResult> = answers.into_iter().map(DetailedResult::from_record).collect();
    let score = count(detailed.iter().filter(|d| d.is_correct()));

    SessionReport {
        candidate,
        detailed,
        score,
        total: u32::try_from(total).unwrap_or(u32::MAX),
    }
}
