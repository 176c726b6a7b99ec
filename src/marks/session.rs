use super::engine::{aggregate, check_mark};
use super::types::{CalculatedMarks, ObtainedMarks, StudentRecord};
use crate::error::MarksError;
use crate::exam::ExamSetup;

/// Marks being entered for one student against one exam setup.
///
/// Owns the setup for the length of the session. Any change to the entered
/// marks discards the last calculation, so a result is never shown next to
/// inputs it was not computed from.
#[derive(Debug, Clone)]
pub struct MarkingSession {
    setup: ExamSetup,
    marks: ObtainedMarks,
    result: Option<CalculatedMarks>,
}

impl MarkingSession {
    /// Start a session with every question at 0
    pub fn new(setup: ExamSetup) -> Self {
        let marks = zeroed(&setup);
        Self {
            setup,
            marks,
            result: None,
        }
    }

    pub fn setup(&self) -> &ExamSetup {
        &self.setup
    }

    pub fn marks(&self) -> &ObtainedMarks {
        &self.marks
    }

    pub fn mark(&self, number: &str) -> Option<f64> {
        self.marks.get(number).copied()
    }

    /// Record the mark for one question.
    ///
    /// Rejected values leave both the entered marks and the last result
    /// untouched.
    pub fn set_mark(&mut self, number: &str, value: f64) -> Result<(), MarksError> {
        let question = self
            .setup
            .question(number)
            .ok_or_else(|| MarksError::UnknownQuestion(number.to_string()))?;
        check_mark(question, value)?;

        self.marks.insert(question.number.clone(), value);
        self.result = None;
        Ok(())
    }

    pub fn clear_mark(&mut self, number: &str) -> Result<(), MarksError> {
        self.set_mark(number, 0.0)
    }

    /// Put every question back to 0
    pub fn reset(&mut self) {
        self.marks = zeroed(&self.setup);
        self.result = None;
    }

    pub fn calculate(&mut self) -> Result<&CalculatedMarks, MarksError> {
        let calculated = aggregate(&self.setup, &self.marks)?;
        Ok(self.result.insert(calculated))
    }

    /// The last calculation, if no mark changed since
    pub fn result(&self) -> Option<&CalculatedMarks> {
        self.result.as_ref()
    }

    pub fn to_record(&self, id: impl Into<String>) -> Result<StudentRecord, MarksError> {
        self.result
            .as_ref()
            .map(|calculated| StudentRecord::from_calculated(id, calculated))
            .ok_or(MarksError::NotCalculated)
    }
}

fn zeroed(setup: &ExamSetup) -> ObtainedMarks {
    setup
        .questions()
        .iter()
        .map(|q| (q.number.clone(), 0.0))
        .collect()
}
