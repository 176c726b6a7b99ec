//! Error types for the two core contracts.
//!
//! Both are plain validation failures: nothing here is transient, and a
//! caller fixes them by resubmitting different input.

use thiserror::Error;

/// Why a candidate exam configuration was rejected.
///
/// Rules are checked in declaration order and only the first failure is
/// reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("Please enter exam name")]
    MissingName,

    #[error("Please enter valid total marks")]
    InvalidTotalMarks,

    #[error("Please add at least one Course Outcome")]
    NoCourseOutcomes,

    #[error("Course Outcome {0} is listed more than once")]
    DuplicateCourseOutcome(String),

    #[error("Please add at least one question")]
    NoValidQuestions,

    #[error("Question {0} is listed more than once")]
    DuplicateQuestion(String),

    #[error("Question {question} is mapped to {co}, which is not a listed Course Outcome")]
    UnknownCourseOutcome { question: String, co: String },

    #[error(
        "Total marks from questions ({computed}) doesn't match the specified total marks ({declared})"
    )]
    TotalMarksMismatch { computed: f64, declared: f64 },
}

/// Why a set of obtained marks could not be aggregated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarksError {
    #[error("Marks cannot exceed maximum marks ({maximum}) for question {question}")]
    MarkExceedsMaximum { question: String, maximum: f64 },

    #[error("Marks cannot be negative for question {question}")]
    MarkBelowMinimum { question: String },

    #[error("Marks for question {question} must be a finite number")]
    InvalidMark { question: String },

    #[error("Question {0} is not part of this exam")]
    UnknownQuestion(String),

    #[error("No calculated result is available; calculate marks first")]
    NotCalculated,
}
