use super::types::CalculatedMarks;
use crate::exam::ExamSetup;

#[derive(Debug, Clone, PartialEq)]
pub struct CoAttainment {
    pub code: String,
    pub obtained: f64,
    pub possible: f64,
    /// `None` when no question assesses this course outcome
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attainment {
    pub cos: Vec<CoAttainment>,
    pub obtained: f64,
    pub possible: f64,
    pub percent: Option<f64>,
}

/// `obtained / possible * 100`, undefined for a zero denominator.
pub fn percent(obtained: f64, possible: f64) -> Option<f64> {
    if possible > 0.0 {
        Some(obtained / possible * 100.0)
    } else {
        None
    }
}

/// Relate a calculation back to the marks each course outcome could have
/// earned.
pub fn attainment(setup: &ExamSetup, calculated: &CalculatedMarks) -> Attainment {
    let cos = calculated
        .co_marks
        .iter()
        .map(|co| {
            let possible = setup.possible_marks(&co.code);
            CoAttainment {
                code: co.code.clone(),
                obtained: co.obtained,
                possible,
                percent: percent(co.obtained, possible),
            }
        })
        .collect();

    Attainment {
        cos,
        obtained: calculated.total_marks,
        possible: setup.total_marks(),
        percent: percent(calculated.total_marks, setup.total_marks()),
    }
}
