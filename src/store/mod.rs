pub mod records;
pub mod setup;

pub use records::{load_record_book, save_record_book, RecordBook};
pub use setup::{load_exam_setup, read_raw_setup, save_exam_setup};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Active exam setup file inside the data directory
pub fn exam_path(data_dir: &Path) -> PathBuf {
    data_dir.join("exam.json")
}

/// Stored student records file inside the data directory
pub fn records_path(data_dir: &Path) -> PathBuf {
    data_dir.join("records.json")
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }
    Ok(())
}
