use serde::{Deserialize, Serialize};

use crate::model::answer::DetailedResult;
use crate::model::candidate::Candidate;

/// Final outcome of an assessment session.
///
/// Built once when the last question settles and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub candidate: Candidate,
    pub detailed: Vec<DetailedResult>,
    pub score: u32,
    pub total: u32,
}

impl SessionReport {
    /// Questions where the candidate picked an option.
    #[must_use]
    pub fn attempted(&self) -> u32 {
        count(self.detailed.iter().filter(|d| d.selected_index.is_some()))
    }

    /// Questions judged correct. Always equal to `score`.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        count(self.detailed.iter().filter(|d| d.is_correct()))
    }
}

pub(crate) fn count<T>(items: impl Iterator<Item = T>) -> u32 {
    u32::try_from(items.count()).unwrap_or(u32::MAX)
}
