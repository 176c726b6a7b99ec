pub mod normalize;
pub mod types;
pub mod validation;

pub use normalize::normalize_co_code;
pub use types::{CourseOutcome, ExamSetup, Question, RawExamSetup};
pub use validation::{validate, validate_with_report, SetupWarning, ValidatedSetup};
