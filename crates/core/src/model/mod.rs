mod answer;
mod candidate;
mod ids;
mod question;
mod report;

pub use answer::{AnswerRecord, DetailedResult};
pub use candidate::{Candidate, CandidateField};
pub use ids::{ParseIdError, QuestionId, ResultId, SessionId};
pub use question::{Level, Question, QuestionDraft, QuestionError, TimeBudget};
pub use report::SessionReport;

pub(crate) use report::count;
