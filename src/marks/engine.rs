use super::types::{CalculatedMarks, CoMark, ObtainedMarks, QuestionMark};
use crate::error::MarksError;
use crate::exam::{ExamSetup, Question};

/// Check one obtained mark against its question's bounds.
///
/// Callers collecting marks one at a time use this to reject a value as
/// soon as it is entered.
pub fn check_mark(question: &Question, mark: f64) -> Result<(), MarksError> {
    if !mark.is_finite() {
        return Err(MarksError::InvalidMark {
            question: question.number.clone(),
        });
    }
    if mark < 0.0 {
        return Err(MarksError::MarkBelowMinimum {
            question: question.number.clone(),
        });
    }
    if mark > question.marks {
        return Err(MarksError::MarkExceedsMaximum {
            question: question.number.clone(),
            maximum: question.marks,
        });
    }
    Ok(())
}

/// Sum obtained marks per course outcome and overall.
///
/// Questions without an entry in `obtained` count as 0, entries for numbers
/// that are not part of the exam are ignored. Every listed course outcome
/// appears in the result, including ones no question scored against. The
/// first question (in setup order) whose mark is out of bounds fails the
/// whole calculation.
#[tracing::instrument(skip_all, fields(exam = %setup.name(), entries = obtained.len()))]
pub fn aggregate(setup: &ExamSetup, obtained: &ObtainedMarks) -> Result<CalculatedMarks, MarksError> {
    for number in obtained.keys() {
        if setup.question(number).is_none() {
            tracing::debug!(question = %number, "ignoring marks for unknown question");
        }
    }

    let mut co_marks: Vec<CoMark> = setup
        .cos()
        .iter()
        .map(|co| CoMark {
            code: co.code.clone(),
            obtained: 0.0,
        })
        .collect();
    let mut question_marks = Vec::with_capacity(setup.questions().len());

    for question in setup.questions() {
        let mark = obtained.get(&question.number).copied().unwrap_or(0.0);
        check_mark(question, mark)?;

        match co_marks.iter_mut().find(|c| c.code == question.co) {
            Some(entry) => entry.obtained += mark,
            // Only reachable if the setup invariant was broken upstream
            None => co_marks.push(CoMark {
                code: question.co.clone(),
                obtained: mark,
            }),
        }

        question_marks.push(QuestionMark {
            number: question.number.clone(),
            obtained: mark,
        });
    }

    let total_marks = co_marks.iter().map(|c| c.obtained).sum();
    tracing::debug!(total = total_marks, "marks aggregated");

    Ok(CalculatedMarks {
        question_marks,
        co_marks,
        total_marks,
    })
}
