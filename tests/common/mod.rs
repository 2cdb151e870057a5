#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use expense_tracker::core::{ExpenseManager, PathResolver};
use exptrack_core::FixedClock;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data directory that outlives the calling test.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Opens the SQLite-backed manager in `dir` with the clock pinned to `today` 10:00.
pub fn open_manager(dir: &Path, today: NaiveDate) -> ExpenseManager {
    let clock = FixedClock(today.and_hms_opt(10, 0, 0).expect("valid time"));
    ExpenseManager::open(&PathResolver::new(dir), Box::new(clock)).expect("open manager")
}
