use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Quiz from the calculator walkthrough: Q1 (CO1, 5), Q2 (CO1, 3), Q3 (CO2, 2)
#[allow(dead_code)]
pub const QUIZ_JSON: &str = r#"{
  "name": "Quiz",
  "totalMarks": 10,
  "cos": [{ "code": "CO1" }, { "code": "CO2" }],
  "questions": [
    { "number": "1", "co": "CO1", "marks": 5 },
    { "number": "2", "co": "CO1", "marks": 3 },
    { "number": "3", "co": "co2", "marks": 2 }
  ]
}
"#;

/// `co-calc` bound to an isolated config and data directory
pub fn co_calc(dir: &Path) -> Command {
    let config = dir.join("config.yaml");
    if !config.exists() {
        fs::write(&config, "color: never\n").expect("write test config");
    }

    let mut cmd = cargo_bin_cmd!("co-calc");
    cmd.arg("--config")
        .arg(&config)
        .arg("--data-dir")
        .arg(dir.join("data"))
        .env_remove("CO_CALC_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Save the quiz setup into the data directory
#[allow(dead_code)]
pub fn setup_quiz(dir: &Path) {
    let file = write_file(dir, "quiz.json", QUIZ_JSON);
    co_calc(dir).arg("setup").arg(file).assert().success();
}
