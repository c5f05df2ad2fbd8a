#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use expense_core::{
    ledger::{FixedClock, PeriodLedger},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

pub fn clock_at(y: i32, m: u32, d: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::at(local(y, m, d, 12, 0, 0)))
}

/// Opens a ledger persisted under `dir` with the given clock.
pub fn open_ledger(dir: &PathBuf, clock: Arc<FixedClock>) -> PeriodLedger {
    let store = JsonFileStore::new(dir).expect("create json store");
    PeriodLedger::load(Box::new(store), clock)
}
