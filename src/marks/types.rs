use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Obtained marks keyed by question number. A question without an entry
/// scored 0.
pub type ObtainedMarks = HashMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionMark {
    pub number: String,
    pub obtained: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoMark {
    pub code: String,
    pub obtained: f64,
}

/// Result of one aggregation run.
///
/// A fresh value is produced for every calculation; when the inputs change
/// the old snapshot is discarded rather than updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMarks {
    /// One entry per exam question, in question order
    pub question_marks: Vec<QuestionMark>,
    /// One entry per course outcome, in course outcome order
    pub co_marks: Vec<CoMark>,
    pub total_marks: f64,
}

impl CalculatedMarks {
    pub fn co_mark(&self, code: &str) -> Option<f64> {
        self.co_marks
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.obtained)
    }

    pub fn question_mark(&self, number: &str) -> Option<f64> {
        self.question_marks
            .iter()
            .find(|q| q.number == number)
            .map(|q| q.obtained)
    }
}

/// A stored result for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    /// Obtained marks keyed by question number
    pub marks: BTreeMap<String, f64>,
    /// Obtained marks keyed by course outcome code
    pub co_marks: BTreeMap<String, f64>,
    pub total_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl StudentRecord {
    pub fn from_calculated(id: impl Into<String>, calculated: &CalculatedMarks) -> Self {
        Self {
            id: id.into(),
            marks: calculated
                .question_marks
                .iter()
                .map(|q| (q.number.clone(), q.obtained))
                .collect(),
            co_marks: calculated
                .co_marks
                .iter()
                .map(|c| (c.code.clone(), c.obtained))
                .collect(),
            total_marks: calculated.total_marks,
            recorded_at: Some(Utc::now()),
        }
    }
}
