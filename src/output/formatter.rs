use std::cmp::Ordering;
use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::config::ColorMode;
use crate::exam::{ExamSetup, Question};
use crate::marks::{attainment, CalculatedMarks, StudentRecord};

const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Auto => should_use_colors(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

/// Marks print without a trailing ".0"
pub fn format_mark(value: f64) -> String {
    format!("{}", value)
}

/// Format a percentage, or "n/a" when it is undefined
pub fn format_percent(percent: Option<f64>, precision: usize) -> String {
    match percent {
        Some(p) => format!("{:.*}%", precision, p),
        None => "n/a".to_string(),
    }
}

/// Text progress bar, `[#####---------------]`
fn format_bar(percent: Option<f64>) -> String {
    let filled = percent
        .map(|p| ((p / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize)
        .unwrap_or(0);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Order questions the way they are printed on a paper: numerically when
/// both numbers start with digits ("2" before "10"), otherwise as text.
pub fn question_display_order(questions: &[Question]) -> Vec<&Question> {
    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by(|a, b| compare_question_numbers(&a.number, &b.number));
    ordered
}

fn compare_question_numbers(a: &str, b: &str) -> Ordering {
    match (leading_int(a), leading_int(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn leading_int(s: &str) -> Option<u64> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Describe an exam setup: course outcomes with their possible marks, then
/// the questions.
pub fn format_setup(setup: &ExamSetup, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let title = format!("{} ({} marks)", setup.name(), format_mark(setup.total_marks()));
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    lines.push(String::new());
    lines.push("Course Outcomes:".to_string());
    for code in setup.co_codes() {
        let question_count = setup.questions().iter().filter(|q| q.co == code).count();
        lines.push(format!(
            "  {:<8} {:>6} marks  {} question(s)",
            code,
            format_mark(setup.possible_marks(code)),
            question_count
        ));
    }

    lines.push(String::new());
    lines.push("Questions:".to_string());
    for q in question_display_order(setup.questions()) {
        let label = format!("Q{}", q.number);
        let co = if use_colors {
            q.co.cyan().to_string()
        } else {
            q.co.clone()
        };
        lines.push(format!("  {:<8} {:<8} {:>6} marks", label, co, format_mark(q.marks)));
    }

    lines.join("\n")
}

/// Render a calculation: overall total, CO-wise performance and
/// question-wise marks.
pub fn format_results(
    setup: &ExamSetup,
    calculated: &CalculatedMarks,
    precision: usize,
    use_colors: bool,
) -> String {
    let summary = attainment(setup, calculated);
    let mut lines = Vec::new();

    let total = format!(
        "Total: {} / {} ({})",
        format_mark(summary.obtained),
        format_mark(summary.possible),
        format_percent(summary.percent, precision)
    );
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });

    lines.push(String::new());
    lines.push("CO-wise Performance:".to_string());
    for co in &summary.cos {
        let bar = format_bar(co.percent);
        let bar = if use_colors {
            bar.green().to_string()
        } else {
            bar
        };
        lines.push(format!(
            "  {:<8} {:>6} / {:<6} {} {:>7}",
            co.code,
            format_mark(co.obtained),
            format_mark(co.possible),
            bar,
            format_percent(co.percent, precision)
        ));
    }

    lines.push(String::new());
    lines.push("Question-wise Marks:".to_string());
    for q in question_display_order(setup.questions()) {
        let obtained = calculated.question_mark(&q.number).unwrap_or(0.0);
        lines.push(format!(
            "  {:<8} {:<8} {:>6} / {}",
            format!("Q{}", q.number),
            q.co,
            format_mark(obtained),
            format_mark(q.marks)
        ));
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format stored records as a table, one row per record.
///
/// Columns follow the export layout: id, question marks, CO marks, total.
/// The id column is truncated when the table would not fit the terminal.
pub fn format_records_table(
    setup: &ExamSetup,
    records: &[StudentRecord],
    use_colors: bool,
) -> String {
    if records.is_empty() {
        return "No records found.".to_string();
    }

    let mut headers: Vec<String> = setup
        .questions()
        .iter()
        .map(|q| format!("Q{}", q.number))
        .collect();
    headers.extend(setup.co_codes().map(str::to_string));
    headers.push("Total".to_string());

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row: Vec<String> = setup
                .questions()
                .iter()
                .map(|q| format_mark(record.marks.get(&q.number).copied().unwrap_or(0.0)))
                .collect();
            row.extend(
                setup
                    .co_codes()
                    .map(|code| format_mark(record.co_marks.get(code).copied().unwrap_or(0.0))),
            );
            row.push(format_mark(record.total_marks));
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = "  ";
    let fixed_width: usize = widths.iter().map(|w| w + separator.len()).sum();
    let natural_id_width = records
        .iter()
        .map(|r| r.id.chars().count())
        .chain(std::iter::once("Record ID".len()))
        .max()
        .unwrap_or(0);
    let id_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => natural_id_width.min(width - fixed_width),
        Some(_) => natural_id_width.min(10),
        None => natural_id_width,
    };

    let format_row = |id: &str, cells: &[String]| -> String {
        let mut line = format!("{:<width$}", truncate(id, id_width), width = id_width);
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(separator);
            line.push_str(&format!("{:>width$}", cell, width = *width));
        }
        line
    };

    let header_line = format_row("Record ID", &headers);
    let mut lines = vec![if use_colors {
        header_line.bold().to_string()
    } else {
        header_line
    }];
    for (record, row) in records.iter().zip(&rows) {
        lines.push(format_row(&record.id, row));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::{validate, CourseOutcome, RawExamSetup};
    use crate::marks::{aggregate, ObtainedMarks};

    fn quiz() -> ExamSetup {
        validate(&RawExamSetup {
            name: "Quiz".to_string(),
            total_marks: 10.0,
            cos: vec![CourseOutcome::new("CO1"), CourseOutcome::new("CO2")],
            questions: vec![Question::new("1", "CO1", 5.0), Question::new("2", "CO2", 5.0)],
        })
        .unwrap()
    }

    fn calculated(setup: &ExamSetup, q1: f64, q2: f64) -> CalculatedMarks {
        let obtained: ObtainedMarks =
            [("1".to_string(), q1), ("2".to_string(), q2)].into_iter().collect();
        aggregate(setup, &obtained).unwrap()
    }

    #[test]
    fn test_format_mark() {
        assert_eq!(format_mark(5.0), "5");
        assert_eq!(format_mark(2.5), "2.5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(80.0), 1), "80.0%");
        assert_eq!(format_percent(Some(66.666), 0), "67%");
        assert_eq!(format_percent(None, 1), "n/a");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(Some(50.0)), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(format_bar(None), format!("[{}]", "-".repeat(20)));
        assert_eq!(format_bar(Some(100.0)), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_question_display_order_numeric() {
        let questions = vec![
            Question::new("10", "CO1", 1.0),
            Question::new("2", "CO1", 1.0),
            Question::new("1b", "CO1", 1.0),
            Question::new("1a", "CO1", 1.0),
        ];
        let order: Vec<&str> = question_display_order(&questions)
            .iter()
            .map(|q| q.number.as_str())
            .collect();
        assert_eq!(order, vec!["1a", "1b", "2", "10"]);
    }

    #[test]
    fn test_question_display_order_text() {
        let questions = vec![Question::new("B", "CO1", 1.0), Question::new("A", "CO1", 1.0)];
        let order: Vec<&str> = question_display_order(&questions)
            .iter()
            .map(|q| q.number.as_str())
            .collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn test_format_setup() {
        let result = format_setup(&quiz(), false);
        assert!(result.starts_with("Quiz (10 marks)"));
        assert!(result.contains("CO1"));
        assert!(result.contains("Q2"));
    }

    #[test]
    fn test_format_results() {
        let setup = quiz();
        let result = format_results(&setup, &calculated(&setup, 5.0, 3.0), 1, false);
        assert!(result.starts_with("Total: 8 / 10 (80.0%)"));
        assert!(result.contains("100.0%"));
        assert!(result.contains("60.0%"));
        assert!(result.contains("3 / 5"));
    }

    #[test]
    fn test_format_records_table_empty() {
        assert_eq!(format_records_table(&quiz(), &[], false), "No records found.");
    }

    #[test]
    fn test_format_records_table_rows() {
        let setup = quiz();
        let records = vec![
            StudentRecord::from_calculated("s1", &calculated(&setup, 5.0, 3.0)),
            StudentRecord::from_calculated("s2", &calculated(&setup, 1.5, 0.0)),
        ];
        let result = format_records_table(&setup, &records, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Record ID"));
        assert!(lines[0].trim_end().ends_with("Total"));
        assert!(lines[1].starts_with("s1"));
        assert!(lines[1].trim_end().ends_with('8'));
        assert!(lines[2].contains("1.5"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long identifier", 10), "a very ...");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
