use anyhow::{bail, Context, Result};

use super::types::ObtainedMarks;

/// Parse one `QUESTION=MARK` argument.
///
/// An empty mark (`3=`) means 0, as in a blank entry field.
pub fn parse_mark_entry(entry: &str) -> Result<(String, f64)> {
    let Some((number, value)) = entry.split_once('=') else {
        bail!("Invalid marks entry '{}': expected QUESTION=MARK", entry);
    };

    let number = number.trim();
    if number.is_empty() {
        bail!("Invalid marks entry '{}': missing question number", entry);
    }

    let value = value.trim();
    let mark = if value.is_empty() {
        0.0
    } else {
        value
            .parse::<f64>()
            .with_context(|| format!("Invalid marks entry '{}': '{}' is not a number", entry, value))?
    };

    Ok((number.to_string(), mark))
}

/// Parse `QUESTION=MARK` arguments into obtained marks. A question may only
/// be given once.
pub fn parse_mark_entries<S: AsRef<str>>(entries: &[S]) -> Result<ObtainedMarks> {
    let mut obtained = ObtainedMarks::new();
    for entry in entries {
        let (number, mark) = parse_mark_entry(entry.as_ref())?;
        if obtained.insert(number.clone(), mark).is_some() {
            bail!("Question {} given more than once", number);
        }
    }
    Ok(obtained)
}
