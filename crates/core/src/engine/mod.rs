//! The timed assessment engine: session state machine, answer recorder and
//! scorer.

mod recorder;
pub mod scoring;
mod session;

pub use recorder::AnswerRecorder;
pub use scoring::finalize;
pub use session::{
    Advance, AssessmentSession, EngineError, Ignored, MANUAL_SETTLE, SessionState, Submission,
    SubmitTrigger, TIMEOUT_SETTLE, TickOutcome,
};
