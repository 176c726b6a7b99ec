use std::collections::HashSet;
use std::fmt;

use super::normalize::normalize_co_code;
use super::types::{CourseOutcome, ExamSetup, Question, RawExamSetup};
use crate::error::SetupError;

/// An entry that was dropped while validating a setup.
///
/// Dropping never fails validation on its own; these only explain why an
/// entry the user typed is missing from the saved setup. Positions are
/// 1-based, as shown in an entry form.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupWarning {
    EmptyCourseOutcome { position: usize },
    QuestionMissingNumber { position: usize },
    QuestionMissingCo { position: usize, number: String },
    QuestionNonPositiveMarks {
        position: usize,
        number: String,
        marks: f64,
    },
}

impl fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupWarning::EmptyCourseOutcome { position } => {
                write!(f, "course outcome #{}: empty code, ignored", position)
            }
            SetupWarning::QuestionMissingNumber { position } => {
                write!(f, "question #{}: no question number, ignored", position)
            }
            SetupWarning::QuestionMissingCo { position, number } => {
                write!(f, "question #{} ({}): no course outcome mapped, ignored", position, number)
            }
            SetupWarning::QuestionNonPositiveMarks {
                position,
                number,
                marks,
            } => write!(
                f,
                "question #{} ({}): marks must be greater than 0 (got {}), ignored",
                position, number, marks
            ),
        }
    }
}

/// A setup that passed validation, plus the entries dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSetup {
    pub setup: ExamSetup,
    pub warnings: Vec<SetupWarning>,
}

/// Validate a raw exam configuration.
///
/// Returns the first violated rule; see [`validate_with_report`] for the
/// order and for the list of silently dropped entries.
pub fn validate(raw: &RawExamSetup) -> Result<ExamSetup, SetupError> {
    validate_with_report(raw).map(|validated| validated.setup)
}

/// Validate a raw exam configuration, reporting dropped entries.
///
/// Course outcomes with an empty code and questions lacking a number, a
/// course outcome or positive marks are dropped before the checks run.
/// Rules, first failure wins:
///
/// 1. name is non-empty after trimming
/// 2. total marks is a positive finite number
/// 3. at least one course outcome remains
/// 4. course outcome codes are unique after normalization
/// 5. at least one question remains
/// 6. question numbers are unique
/// 7. every question maps to a listed course outcome
/// 8. question marks add up to the total exactly
#[tracing::instrument(skip(raw), fields(cos = raw.cos.len(), questions = raw.questions.len()))]
pub fn validate_with_report(raw: &RawExamSetup) -> Result<ValidatedSetup, SetupError> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(SetupError::MissingName);
    }

    if !(raw.total_marks.is_finite() && raw.total_marks > 0.0) {
        return Err(SetupError::InvalidTotalMarks);
    }

    let mut warnings = Vec::new();

    let mut cos = Vec::new();
    for (i, co) in raw.cos.iter().enumerate() {
        let code = normalize_co_code(&co.code);
        if code.is_empty() {
            warnings.push(SetupWarning::EmptyCourseOutcome { position: i + 1 });
            continue;
        }
        cos.push(CourseOutcome { code });
    }

    if cos.is_empty() {
        return Err(SetupError::NoCourseOutcomes);
    }

    let mut known_codes = HashSet::new();
    for co in &cos {
        if !known_codes.insert(co.code.clone()) {
            return Err(SetupError::DuplicateCourseOutcome(co.code.clone()));
        }
    }

    let mut questions = Vec::new();
    for (i, q) in raw.questions.iter().enumerate() {
        let position = i + 1;
        let number = q.number.trim();
        let co = normalize_co_code(&q.co);

        if number.is_empty() {
            warnings.push(SetupWarning::QuestionMissingNumber { position });
            continue;
        }
        if co.is_empty() {
            warnings.push(SetupWarning::QuestionMissingCo {
                position,
                number: number.to_string(),
            });
            continue;
        }
        if q.marks.is_nan() || q.marks <= 0.0 {
            warnings.push(SetupWarning::QuestionNonPositiveMarks {
                position,
                number: number.to_string(),
                marks: q.marks,
            });
            continue;
        }

        questions.push(Question {
            number: number.to_string(),
            co,
            marks: q.marks,
        });
    }

    if questions.is_empty() {
        return Err(SetupError::NoValidQuestions);
    }

    let mut numbers = HashSet::new();
    for q in &questions {
        if !numbers.insert(q.number.as_str()) {
            return Err(SetupError::DuplicateQuestion(q.number.clone()));
        }
    }

    if let Some(q) = questions.iter().find(|q| !known_codes.contains(&q.co)) {
        return Err(SetupError::UnknownCourseOutcome {
            question: q.number.clone(),
            co: q.co.clone(),
        });
    }

    let computed: f64 = questions.iter().map(|q| q.marks).sum();
    if computed != raw.total_marks {
        return Err(SetupError::TotalMarksMismatch {
            computed,
            declared: raw.total_marks,
        });
    }

    tracing::debug!(
        cos = cos.len(),
        questions = questions.len(),
        dropped = warnings.len(),
        "exam setup accepted"
    );

    Ok(ValidatedSetup {
        setup: ExamSetup::new(name.to_string(), raw.total_marks, cos, questions),
        warnings,
    })
}
