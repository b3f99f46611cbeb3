#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment;
pub mod bank;
pub mod elicitation;
pub mod error;
pub mod intake;
pub mod results;

pub use interview_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, BankError, IntakeError, ResultServiceError, WorkflowError};

pub use assessment::{
    AssessmentService, AttendanceCheck, DriverTiming, SessionDriver, SessionEvent, SessionHandle,
    SessionProgress, SessionUpdate,
};
pub use bank::{InOrder, QuestionBank, QuestionSampler, RandomPerLevel};
pub use elicitation::DialogueDriver;
pub use intake::{ResumeParser, read_resume};
pub use results::{ResultQuery, ResultService, ResultSort};
