use anyhow::Result;
use std::io::{BufRead, Write};

use super::prompt::Prompter;
use crate::exam::{
    normalize_co_code, validate_with_report, CourseOutcome, ExamSetup, Question, RawExamSetup,
    ValidatedSetup,
};
use crate::output::format_mark;

/// Walk the user through defining an exam.
///
/// When `initial` is given its values are offered as defaults, so an
/// existing setup can be edited. A setup the validator rejects is shown with
/// the reason and can be edited again; declining returns the
/// [`SetupError`](crate::error::SetupError).
pub fn run_setup_wizard<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    initial: Option<&ExamSetup>,
) -> Result<ValidatedSetup> {
    p.say("Exam Setup")?;
    p.say("==========")?;
    p.say("Define your exam details, course outcomes (COs), and questions with their CO mappings.")?;
    p.say("")?;

    let mut defaults = initial.map(ExamSetup::to_raw);
    loop {
        let raw = collect_setup(p, defaults.as_ref())?;
        match validate_with_report(&raw) {
            Ok(validated) => return Ok(validated),
            Err(e) => {
                p.say("")?;
                p.say(&format!("  {}", e))?;
                if !p.prompt_yes_no("Edit the setup again?", true)? {
                    return Err(e.into());
                }
                p.say("")?;
                defaults = Some(raw);
            }
        }
    }
}

fn collect_setup<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    defaults: Option<&RawExamSetup>,
) -> Result<RawExamSetup> {
    let name = match defaults.map(|d| d.name.trim()).filter(|n| !n.is_empty()) {
        Some(previous) => p.prompt_with_default("Exam name", previous)?,
        None => loop {
            let name = p.prompt("Exam name (e.g., Mid Semester Test-2): ")?;
            if !name.is_empty() {
                break name;
            }
            p.say("  Exam name is required.")?;
        },
    };

    let previous_total = defaults
        .map(|d| d.total_marks)
        .filter(|t| t.is_finite() && *t > 0.0)
        .map(format_mark);
    let total_marks = loop {
        let input = match &previous_total {
            Some(previous) => p.prompt_with_default("Total marks", previous)?,
            None => p.prompt("Total marks (e.g., 20): ")?,
        };
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => break v,
            _ => p.say("  Invalid: must be a positive number. Try again.")?,
        }
    };

    p.say("")?;
    let cos = collect_cos(p, defaults.map(|d| d.cos.as_slice()).unwrap_or_default())?;

    p.say("")?;
    let questions = collect_questions(
        p,
        &cos,
        total_marks,
        defaults.map(|d| d.questions.as_slice()).unwrap_or_default(),
    )?;

    Ok(RawExamSetup {
        name,
        total_marks,
        cos,
        questions,
    })
}

fn collect_cos<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    previous: &[CourseOutcome],
) -> Result<Vec<CourseOutcome>> {
    if !previous.is_empty() {
        let codes: Vec<&str> = previous.iter().map(|c| c.code.as_str()).collect();
        if p.prompt_yes_no(&format!("Keep course outcomes {}?", codes.join(", ")), true)? {
            return Ok(previous.to_vec());
        }
    }

    p.say("Course Outcomes: one code per line (e.g., CO1 or just 1), blank line to finish.")?;
    let mut cos: Vec<CourseOutcome> = Vec::new();
    loop {
        let input = p.prompt(&format!("  CO code #{}: ", cos.len() + 1))?;
        if input.is_empty() {
            if cos.is_empty() {
                p.say("  At least one course outcome is required.")?;
                continue;
            }
            return Ok(cos);
        }

        let code = normalize_co_code(&input);
        if cos.iter().any(|c| c.code == code) {
            p.say(&format!("  {} is already listed.", code))?;
            continue;
        }
        cos.push(CourseOutcome::new(code));
    }
}

fn collect_questions<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    cos: &[CourseOutcome],
    total_marks: f64,
    previous: &[Question],
) -> Result<Vec<Question>> {
    let previous_fits = !previous.is_empty()
        && previous
            .iter()
            .all(|q| cos.iter().any(|c| c.code == normalize_co_code(&q.co)));
    if previous_fits
        && p.prompt_yes_no(&format!("Keep the {} existing question(s)?", previous.len()), true)?
    {
        return Ok(previous.to_vec());
    }

    p.say("Questions: enter the question number, its marks and the CO it maps to.")?;
    p.say("Leave the question number blank to finish.")?;

    let codes: Vec<&str> = cos.iter().map(|c| c.code.as_str()).collect();
    let mut questions: Vec<Question> = Vec::new();
    loop {
        let assigned: f64 = questions.iter().map(|q| q.marks).sum();
        let number = p.prompt(&format!(
            "  Question number ({} of {} marks assigned): ",
            format_mark(assigned),
            format_mark(total_marks)
        ))?;
        if number.is_empty() {
            if questions.is_empty() {
                p.say("  At least one question is required.")?;
                continue;
            }
            return Ok(questions);
        }
        if questions.iter().any(|q| q.number == number) {
            p.say(&format!("  Question {} is already listed.", number))?;
            continue;
        }

        let marks = loop {
            let input = p.prompt("    Marks (e.g., 5): ")?;
            match input.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => break v,
                _ => p.say("    Invalid: must be a positive number. Try again.")?,
            }
        };

        let co = loop {
            let input = p.prompt_with_default(
                &format!("    Mapped CO ({})", codes.join("/")),
                codes[0],
            )?;
            let code = normalize_co_code(&input);
            if codes.contains(&code.as_str()) {
                break code;
            }
            p.say(&format!("    Invalid: {} is not one of {}.", code, codes.join(", ")))?;
        };

        questions.push(Question { number, co, marks });
    }
}
