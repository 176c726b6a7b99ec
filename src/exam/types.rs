use serde::{Deserialize, Serialize};

/// A learning objective that questions are tagged against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseOutcome {
    /// Canonical code once validated, e.g. "CO1"
    #[serde(default)]
    pub code: String,
}

impl CourseOutcome {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A single graded item mapped to exactly one course outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier as printed on the paper ("1", "2a", ...)
    #[serde(default)]
    pub number: String,

    /// Code of the course outcome this question assesses
    #[serde(default)]
    pub co: String,

    /// Maximum achievable marks
    #[serde(default)]
    pub marks: f64,
}

impl Question {
    pub fn new(number: impl Into<String>, co: impl Into<String>, marks: f64) -> Self {
        Self {
            number: number.into(),
            co: co.into(),
            marks,
        }
    }
}

/// Exam configuration as entered by a user, before validation.
///
/// Shares its serialized shape with [`ExamSetup`], so a saved setup can be
/// read back and re-validated:
///
/// ```json
/// { "name": "Quiz", "totalMarks": 10,
///   "cos": [{ "code": "CO1" }],
///   "questions": [{ "number": "1", "co": "CO1", "marks": 10 }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExamSetup {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub total_marks: f64,

    #[serde(default)]
    pub cos: Vec<CourseOutcome>,

    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A validated, immutable exam configuration.
///
/// Only the setup validator constructs this type. Every question maps to one
/// of the listed course outcomes, codes and numbers are unique, and the
/// question marks add up to `total_marks` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSetup {
    name: String,
    total_marks: f64,
    cos: Vec<CourseOutcome>,
    questions: Vec<Question>,
}

impl ExamSetup {
    pub(super) fn new(
        name: String,
        total_marks: f64,
        cos: Vec<CourseOutcome>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            name,
            total_marks,
            cos,
            questions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_marks(&self) -> f64 {
        self.total_marks
    }

    /// Course outcomes in entry order
    pub fn cos(&self) -> &[CourseOutcome] {
        &self.cos
    }

    /// Questions in entry order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn co_codes(&self) -> impl Iterator<Item = &str> {
        self.cos.iter().map(|co| co.code.as_str())
    }

    pub fn question(&self, number: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.number == number)
    }

    /// Sum of the maximum marks of every question mapped to `co`.
    /// Zero for a course outcome that no question assesses.
    pub fn possible_marks(&self, co: &str) -> f64 {
        self.questions
            .iter()
            .filter(|q| q.co == co)
            .map(|q| q.marks)
            .sum()
    }

    /// Convert back to the editable form, e.g. to change the setup and
    /// validate it again.
    pub fn to_raw(&self) -> RawExamSetup {
        RawExamSetup {
            name: self.name.clone(),
            total_marks: self.total_marks,
            cos: self.cos.clone(),
            questions: self.questions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_setup() -> ExamSetup {
        ExamSetup::new(
            "Quiz".to_string(),
            10.0,
            vec![CourseOutcome::new("CO1"), CourseOutcome::new("CO2"), CourseOutcome::new("CO3")],
            vec![
                Question::new("1", "CO1", 4.0),
                Question::new("2", "CO1", 2.0),
                Question::new("3", "CO2", 4.0),
            ],
        )
    }

    #[test]
    fn test_possible_marks_sums_mapped_questions() {
        let setup = sample_setup();
        assert_eq!(setup.possible_marks("CO1"), 6.0);
        assert_eq!(setup.possible_marks("CO2"), 4.0);
    }

    #[test]
    fn test_possible_marks_zero_for_unassessed_co() {
        let setup = sample_setup();
        assert_eq!(setup.possible_marks("CO3"), 0.0);
    }

    #[test]
    fn test_question_lookup() {
        let setup = sample_setup();
        assert_eq!(setup.question("3").map(|q| q.co.as_str()), Some("CO2"));
        assert!(setup.question("4").is_none());
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(sample_setup()).unwrap();
        assert_eq!(json["name"], "Quiz");
        assert_eq!(json["totalMarks"], 10.0);
        assert_eq!(json["cos"][0]["code"], "CO1");
        assert_eq!(json["questions"][2]["number"], "3");
        assert_eq!(json["questions"][2]["co"], "CO2");
        assert_eq!(json["questions"][2]["marks"], 4.0);
    }

    #[test]
    fn test_raw_parses_partial_entries() {
        let json = r#"{"name":"Quiz","totalMarks":5,"cos":[{}],"questions":[{"number":"1"}]}"#;
        let raw: RawExamSetup = serde_json::from_str(json).unwrap();
        assert_eq!(raw.cos[0].code, "");
        assert_eq!(raw.questions[0].co, "");
        assert_eq!(raw.questions[0].marks, 0.0);
    }

    #[test]
    fn test_to_raw_preserves_order() {
        let raw = sample_setup().to_raw();
        let numbers: Vec<&str> = raw.questions.iter().map(|q| q.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
        assert_eq!(raw.total_marks, 10.0);
    }
}
