//! CSV export of the full ledger.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use exptrack_domain::ExpenseEntry;

use crate::errors::Result;

pub const EXPORT_PREFIX: &str = "expenses";
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const CSV_HEADER: [&str; 4] = ["date", "category", "amount", "description"];

/// `expenses_<YYYYMMDD_HHMMSS>` for the given instant, without extension.
pub fn export_stem(stamp: NaiveDateTime) -> String {
    format!("{EXPORT_PREFIX}_{}", stamp.format(EXPORT_TIMESTAMP_FORMAT))
}

/// Writes `entries` to a new CSV file in `dir` and returns its path.
///
/// Existing files are never replaced: when the timestamped name is taken a
/// `_<n>` suffix is appended.
pub fn write_csv(dir: &Path, stamp: NaiveDateTime, entries: &[ExpenseEntry]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let (file, path) = create_unique(dir, &export_stem(stamp))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.display_date(),
            entry.category.clone(),
            entry.amount.to_string(),
            entry.description.clone(),
        ])?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = entries.len(), "exported expenses");
    Ok(path)
}

fn create_unique(dir: &Path, stem: &str) -> io::Result<(File, PathBuf)> {
    let mut attempt: u32 = 0;
    loop {
        let name = if attempt == 0 {
            format!("{stem}.csv")
        } else {
            format!("{stem}_{attempt}.csv")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => return Err(err),
        }
    }
}
