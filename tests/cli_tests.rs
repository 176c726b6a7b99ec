mod common;

use common::{co_calc, setup_quiz, write_file, QUIZ_JSON};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    co_calc(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Course Outcome attainment calculator"));
}

#[test]
fn test_setup_from_json() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "quiz.json", QUIZ_JSON);

    co_calc(dir.path())
        .arg("setup")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Saved exam setup 'Quiz' (2 COs, 3 questions, 10 marks)",
        ));

    let saved = fs::read_to_string(dir.path().join("data").join("exam.json")).unwrap();
    assert!(saved.contains("\"totalMarks\""));
    // lower-case CO reference is stored normalized
    assert!(!saved.contains("co2"));
}

#[test]
fn test_setup_from_yaml() {
    let dir = tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "midterm.yaml",
        r#"name: Midterm
totalMarks: 20
cos:
  - code: "1"
  - code: "2"
questions:
  - number: "1"
    co: "1"
    marks: 10
  - number: "2"
    co: "2"
    marks: 10
"#,
    );

    co_calc(dir.path()).arg("setup").arg(&file).assert().success();

    co_calc(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Midterm (20 marks)"))
        .stdout(predicate::str::contains("CO1"))
        .stdout(predicate::str::contains("CO2"));
}

#[test]
fn test_setup_total_mismatch_fails_validation() {
    let dir = tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "bad.json",
        r#"{ "name": "Quiz", "totalMarks": 10,
             "cos": [{ "code": "CO1" }],
             "questions": [{ "number": "1", "co": "CO1", "marks": 8 }] }"#,
    );

    co_calc(dir.path())
        .arg("setup")
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Total marks from questions (8) doesn't match the specified total marks (10)",
        ));

    assert!(!dir.path().join("data").join("exam.json").exists());
}

#[test]
fn test_setup_reports_dropped_entries() {
    let dir = tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "partial.json",
        r#"{ "name": "Quiz", "totalMarks": 5,
             "cos": [{ "code": "CO1" }, { "code": "" }],
             "questions": [
               { "number": "1", "co": "CO1", "marks": 5 },
               { "number": "", "co": "CO1", "marks": 2 }
             ] }"#,
    );

    co_calc(dir.path())
        .arg("setup")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));
}

#[test]
fn test_setup_requires_file_or_interactive() {
    let dir = tempdir().unwrap();
    co_calc(dir.path()).arg("setup").assert().failure().code(2);
}

#[test]
fn test_calc_without_setup() {
    let dir = tempdir().unwrap();
    co_calc(dir.path())
        .args(["calc", "1=5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Run `co-calc setup` first"));
}

#[test]
fn test_calc_co_totals() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "1=5", "2=3", "3=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 8 / 10 (80.0%)"))
        .stdout(predicate::str::contains("CO-wise Performance:"))
        .stdout(predicate::str::contains("100.0%"))
        .stdout(predicate::str::contains("0.0%"));
}

#[test]
fn test_calc_missing_questions_score_zero() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "3=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 / 10 (20.0%)"));
}

#[test]
fn test_calc_json() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "--json", "1=4", "2=2.5", "3=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalMarks\": 7.5"))
        .stdout(predicate::str::contains("\"coMarks\""))
        .stdout(predicate::str::contains("\"questionMarks\""));
}

#[test]
fn test_calc_mark_exceeds_maximum() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "1=6"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Marks cannot exceed maximum marks (5) for question 1",
        ));
}

#[test]
fn test_calc_negative_mark() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "2=-1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Marks cannot be negative for question 2"));
}

#[test]
fn test_calc_malformed_entry() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "1:5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected QUESTION=MARK"));
}

#[test]
fn test_records_save_list_delete() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "1=5", "2=3", "--save", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved record s1"));

    co_calc(dir.path())
        .args(["calc", "1=1", "--save", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated record s1"));

    co_calc(dir.path())
        .args(["records", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record ID"))
        .stdout(predicate::str::contains("s1"));

    co_calc(dir.path())
        .args(["records", "delete", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record s1"));

    co_calc(dir.path())
        .args(["records", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));

    co_calc(dir.path())
        .args(["records", "delete", "s1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No record with id s1"));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "1=5", "2=3", "--save", "s1"])
        .assert()
        .success();

    co_calc(dir.path())
        .args(["export", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Record ID,Q1 (CO1),Q2 (CO1),Q3 (CO2),CO1,CO2,Total",
        ))
        .stdout(predicate::str::contains("s1,5,3,0,8,0,8"));
}

#[test]
fn test_export_csv_to_file() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["calc", "3=2", "--save", "s2"])
        .assert()
        .success();

    let out = dir.path().join("results.csv");
    co_calc(dir.path())
        .arg("export")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 record(s)"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.ends_with("s2,0,0,2,0,2,2\n"));
}

#[test]
fn test_export_without_records() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["export", "--output", "-"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No records to export"));
}

#[test]
fn test_enter_reads_marks_from_stdin() {
    let dir = tempdir().unwrap();
    setup_quiz(dir.path());

    co_calc(dir.path())
        .args(["enter", "--save", "s3"])
        .write_stdin("4\n\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 6 / 10 (60.0%)"))
        .stdout(predicate::str::contains("Saved record s3"));
}

#[test]
fn test_missing_explicit_config() {
    let dir = tempdir().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("co-calc");
    cmd.arg("--config")
        .arg(dir.path().join("nope.yaml"))
        .arg("show")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Config file not found"));
}
