use anyhow::{bail, Result};

use crate::exam::ExamSetup;
use crate::marks::StudentRecord;

/// Format stored records as CSV.
///
/// Columns: record id, one column per question (`Q<n> (<CO>)`) in setup
/// order, one per course outcome, then the total. Marks missing from a
/// record are written as 0.
pub fn export_csv(setup: &ExamSetup, records: &[StudentRecord]) -> Result<String> {
    if records.is_empty() {
        bail!("No records to export");
    }

    let mut header = vec!["Record ID".to_string()];
    header.extend(
        setup
            .questions()
            .iter()
            .map(|q| format!("Q{} ({})", q.number, q.co)),
    );
    header.extend(setup.co_codes().map(str::to_string));
    header.push("Total".to_string());

    let mut lines = vec![join_row(&header)];
    for record in records {
        let mut row = vec![record.id.clone()];
        row.extend(setup.questions().iter().map(|q| {
            format_number(record.marks.get(&q.number).copied().unwrap_or(0.0))
        }));
        row.extend(
            setup
                .co_codes()
                .map(|code| format_number(record.co_marks.get(code).copied().unwrap_or(0.0))),
        );
        row.push(format_number(record.total_marks));
        lines.push(join_row(&row));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    Ok(csv)
}

/// Default export file name for an exam
pub fn default_file_name(setup: &ExamSetup) -> String {
    format!("{}_results.csv", setup.name())
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Whole numbers print without a fractional part ("5", not "5.0")
fn format_number(value: f64) -> String {
    format!("{}", value)
}
