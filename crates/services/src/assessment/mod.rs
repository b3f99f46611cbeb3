mod countdown;
mod driver;
mod progress;
mod workflow;

// Public API of the assessment subsystem.
pub use crate::error::WorkflowError;
pub use countdown::Countdown;
pub use driver::{DriverTiming, SessionDriver, SessionEvent, SessionHandle, SessionUpdate};
pub use progress::SessionProgress;
pub use workflow::{AssessmentService, AttendanceCheck};
