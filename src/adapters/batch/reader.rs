//! CSV batch file reader
//!
//! Batch files are named `batch<N>.csv` and must be applied in ascending
//! batch number, since later batches carry newer versions of the same
//! item. Files without a numeric suffix sort last, then by name. Field
//! values are read as raw strings; parsing and validation belong to the
//! transform layer, where the invalid-record policy applies.

use crate::domain::{KursError, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One raw row of a price batch file, prior to transformation
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRecord {
    pub id: String,
    pub item: String,
    pub price: String,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
    pub system_timestamp: String,
}

/// One batch file in reading order
#[derive(Debug, Clone)]
pub struct BatchFile {
    /// File name, for diagnostics
    pub name: String,
    pub rows: Vec<PriceRecord>,
}

/// Reads ordered batch files from a directory
pub struct BatchReader {
    dir: PathBuf,
}

impl BatchReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read every `.csv` file in the batch directory, in batch order
    ///
    /// # Errors
    ///
    /// Returns `KursError::Source` if the directory cannot be listed or a
    /// file cannot be parsed as CSV with the expected columns.
    pub fn read_all(&self) -> Result<Vec<BatchFile>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            KursError::Source(format!(
                "Failed to read batch directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().map(|e| e == "csv").unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();

        names.sort_by_key(|name| sort_key(name));

        let mut batches = Vec::with_capacity(names.len());
        for name in names {
            let rows = read_file(&self.dir.join(&name))?;
            tracing::info!(batch = %name, rows = rows.len(), "Read batch file");
            batches.push(BatchFile { name, rows });
        }

        Ok(batches)
    }
}

fn read_file(path: &Path) -> Result<Vec<PriceRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        KursError::Source(format!("Failed to open {}: {e}", path.display()))
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: PriceRecord = record.map_err(|e| {
            KursError::Source(format!("Failed to parse {}: {e}", path.display()))
        })?;
        rows.push(record);
    }
    Ok(rows)
}

/// Batch number from a filename like `batch12.csv`
fn batch_number(filename: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)\.csv$").unwrap();
    re.captures(filename)
        .and_then(|cap| cap[1].parse().ok())
}

/// Files without a batch number come after numbered ones, ties by name
fn sort_key(filename: &str) -> (u32, String) {
    (
        batch_number(filename).unwrap_or(u32::MAX),
        filename.to_string(),
    )
}
