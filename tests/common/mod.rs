#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use dinario::{FinanceTracker, FixedClock};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON-backed tracker in an isolated directory, pinned to `today`.
pub fn setup_tracker(today: NaiveDate) -> (FinanceTracker, PathBuf) {
    let dir = temp_data_dir().join("data");
    let tracker = FinanceTracker::open(&dir)
        .expect("open tracker")
        .with_clock(Box::new(FixedClock(today)));
    (tracker, dir)
}
