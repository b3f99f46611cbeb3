mod candidate_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use candidate_vm::{CandidateVm, display_name, field_prompt};
pub use quiz_vm::{OptionLineVm, QuizVm, option_label, parse_option};
pub use result_vm::{
    AttendedNoticeVm, ResultDetailVm, ResultRowVm, ReviewRowVm, detailed_json, map_result_rows,
};
pub use time_fmt::{countdown_percent, format_countdown, format_datetime};
