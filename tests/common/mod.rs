use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use tracky_core::{
    config::Settings,
    core::{BudgetManager, FixedClock},
    storage::JsonMonthStore,
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// Creates an isolated manager pinned to `now`, plus a handle on its store
/// for direct inspection.
pub fn setup_manager(now: DateTime<Utc>) -> (BudgetManager, JsonMonthStore) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonMonthStore::new(Some(base)).expect("create json month store");
    let manager = BudgetManager::new(
        Box::new(store.clone()),
        Settings::default(),
        Box::new(FixedClock(now)),
    );
    (manager, store)
}
