use anyhow::Result;
use std::io::{BufRead, Write};

use super::prompt::Prompter;
use crate::marks::{CalculatedMarks, MarkingSession};
use crate::output::{format_mark, question_display_order};

/// Ask for every question's obtained marks, then calculate.
///
/// The current value is offered as the default. A blank answer keeps it,
/// "-" clears it to 0. Out-of-range values are rejected and asked again.
pub fn run_marks_entry<'s, R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    session: &'s mut MarkingSession,
) -> Result<&'s CalculatedMarks> {
    let questions: Vec<(String, String, f64)> = question_display_order(session.setup().questions())
        .into_iter()
        .map(|q| (q.number.clone(), q.co.clone(), q.marks))
        .collect();

    p.say(&format!("Marks Entry: {}", session.setup().name()))?;
    for (number, co, maximum) in &questions {
        loop {
            let current = format_mark(session.mark(number).unwrap_or(0.0));
            let input = p.prompt_with_default(
                &format!("  Q{} ({}) 0-{}", number, co, format_mark(*maximum)),
                &current,
            )?;

            let value = if input == "-" {
                0.0
            } else {
                match input.parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => {
                        p.say("    Invalid: enter a number. Try again.")?;
                        continue;
                    }
                }
            };

            match session.set_mark(number, value) {
                Ok(()) => break,
                Err(e) => p.say(&format!("    {}", e))?,
            }
        }
    }

    Ok(session.calculate()?)
}
