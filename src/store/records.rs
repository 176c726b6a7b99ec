use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::marks::StudentRecord;

/// Stored student results, in the order they were first saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBook {
    pub version: u32,
    #[serde(default)]
    pub records: Vec<StudentRecord>,
}

impl Default for RecordBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBook {
    /// Create a new empty record book with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Insert a record, replacing one with the same id in place.
    /// Returns true if an existing record was replaced.
    pub fn upsert(&mut self, record: StudentRecord) -> bool {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    /// Returns true if a record with this id existed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Load stored records from a JSON file
///
/// If the file doesn't exist, returns an empty book.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_record_book(path: &Path) -> Result<RecordBook> {
    if !path.exists() {
        return Ok(RecordBook::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open records file at {}", path.display()))?;

    let book: RecordBook = serde_json::from_reader(file).context("Failed to load records")?;

    if book.version != 1 {
        anyhow::bail!("Unsupported records file version: {}", book.version);
    }

    Ok(book)
}

/// Save stored records to a JSON file atomically
pub fn save_record_book(path: &Path, book: &RecordBook) -> Result<()> {
    super::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, book).context("Failed to serialize records")?;
    file.commit().context("Failed to save records")?;

    Ok(())
}
