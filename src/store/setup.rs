use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::Path;

use crate::exam::{validate, ExamSetup, RawExamSetup};

/// Load the active exam setup.
///
/// Returns `None` if no setup has been saved yet. The stored file goes
/// through the validator again, so a hand-edited file cannot produce an
/// inconsistent setup.
pub fn load_exam_setup(path: &Path) -> Result<Option<ExamSetup>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open exam setup at {}", path.display()))?;
    let raw: RawExamSetup =
        serde_json::from_reader(file).context("Failed to load exam setup")?;

    let setup = validate(&raw)
        .with_context(|| format!("Saved exam setup at {} is invalid", path.display()))?;
    Ok(Some(setup))
}

/// Save the exam setup atomically, replacing any previous one
pub fn save_exam_setup(path: &Path, setup: &ExamSetup) -> Result<()> {
    super::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, setup).context("Failed to serialize exam setup")?;
    file.commit().context("Failed to save exam setup")?;

    Ok(())
}

/// Read an unvalidated setup authored by hand.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
pub fn read_raw_setup(path: &Path) -> Result<RawExamSetup> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read exam setup file at {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse exam setup: invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse exam setup: invalid JSON in {}", path.display()))
    }
}
