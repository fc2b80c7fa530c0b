use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::BudgetError;
use crate::domain::{MonthKey, MonthlyLedger};
use crate::utils::{app_data_dir, ensure_dir, months_dir_in};

use super::{MonthStore, Result};

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-per-month JSON store: `<base>/months/2026-08.json` and friends.
///
/// Writes go through a temp file and a rename so a crash mid-write never
/// leaves a truncated ledger behind.
#[derive(Clone)]
pub struct JsonMonthStore {
    months_dir: PathBuf,
}

impl JsonMonthStore {
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = base.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        let months_dir = months_dir_in(&base);
        ensure_dir(&months_dir)?;
        Ok(Self { months_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn month_path(&self, key: MonthKey) -> PathBuf {
        self.months_dir
            .join(format!("{}.{}", key, LEDGER_EXTENSION))
    }
}

impl MonthStore for JsonMonthStore {
    fn get(&self, key: MonthKey) -> Result<Option<MonthlyLedger>> {
        let path = self.month_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let ledger = serde_json::from_str(&data)?;
        Ok(Some(ledger))
    }

    fn put(&self, key: MonthKey, ledger: &MonthlyLedger) -> Result<()> {
        let path = self.month_path(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get_all(&self) -> Result<BTreeMap<MonthKey, MonthlyLedger>> {
        let mut months = BTreeMap::new();
        if !self.months_dir.exists() {
            return Ok(months);
        }
        for entry in fs::read_dir(&self.months_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            let key: MonthKey = match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse().ok())
            {
                Some(key) => key,
                // Stray files in the months directory are not ours to fail on.
                None => continue,
            };
            let data = fs::read_to_string(&path)?;
            let ledger = serde_json::from_str(&data)
                .map_err(|err| BudgetError::Storage(format!("ledger `{}`: {}", key, err)))?;
            months.insert(key, ledger);
        }
        Ok(months)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bill;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonMonthStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonMonthStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    fn sample_ledger() -> MonthlyLedger {
        let mut ledger = MonthlyLedger::empty(Some(1300.0));
        ledger.monthly_bills.push(Bill::new("Gas Money", 300.0));
        ledger
    }

    #[test]
    fn put_and_get_round_trip() {
        let (store, _guard) = store_with_temp_dir();
        let key = MonthKey::new(2026, 8).unwrap();
        let ledger = sample_ledger();
        store.put(key, &ledger).expect("save ledger");
        let loaded = store.get(key).expect("load ledger").expect("present");
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn absent_month_is_none_not_an_error() {
        let (store, _guard) = store_with_temp_dir();
        let missing = store.get(MonthKey::new(2030, 1).unwrap()).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn get_all_returns_months_in_chronological_order() {
        let (store, _guard) = store_with_temp_dir();
        let ledger = sample_ledger();
        for key in ["2026-01", "2025-12", "2026-02"] {
            store.put(key.parse().unwrap(), &ledger).unwrap();
        }
        let all = store.get_all().unwrap();
        let keys: Vec<String> = all.keys().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn get_all_skips_files_that_are_not_month_keys() {
        let (store, guard) = store_with_temp_dir();
        store
            .put(MonthKey::new(2026, 8).unwrap(), &sample_ledger())
            .unwrap();
        fs::write(
            months_dir_in(guard.path()).join("notes.json"),
            "not a ledger",
        )
        .unwrap();
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn put_overwrites_with_latest_snapshot() {
        let (store, _guard) = store_with_temp_dir();
        let key = MonthKey::new(2026, 8).unwrap();
        let mut ledger = sample_ledger();
        store.put(key, &ledger).unwrap();
        ledger.extra_funds = 75.0;
        store.put(key, &ledger).unwrap();
        let loaded = store.get(key).unwrap().unwrap();
        assert_eq!(loaded.extra_funds, 75.0);
    }
}
