use std::fs;

use tempfile::tempdir;
use tracky_core::{
    config::{Settings, SettingsManager},
    core::Action,
    domain::{MonthKey, MonthlyLedger},
    storage::{JsonMonthStore, MonthStore},
};

fn sample_ledger() -> MonthlyLedger {
    let batch = [
        Action::AddBill {
            name: "Gas Money".into(),
            budget: 300.0,
        },
        Action::AddExtraFunds {
            amount: 40.0,
            note: Some("birthday".into()),
        },
        Action::AddToSavings { amount: 25.0 },
    ];
    tracky_core::core::actions::apply_batch(
        &MonthlyLedger::empty(Some(1300.0)),
        &batch,
        chrono::Utc::now(),
    )
    .ledger
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let store = JsonMonthStore::new(Some(temp.path().to_path_buf())).unwrap();
    let key: MonthKey = "2026-08".parse().unwrap();

    store.put(key, &sample_ledger()).expect("initial save");
    let path = store.month_path(key);
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name to force the
    // write to fail.
    let mut tmp = path.clone();
    tmp.set_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    let mut changed = sample_ledger();
    changed.extra_funds = 999.0;
    assert!(store.put(key, &changed).is_err());

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original, "failed save must not corrupt the ledger");
}

#[test]
fn ledger_json_uses_stable_field_names_and_kinds() {
    let temp = tempdir().unwrap();
    let store = JsonMonthStore::new(Some(temp.path().to_path_buf())).unwrap();
    let key: MonthKey = "2026-08".parse().unwrap();
    store.put(key, &sample_ledger()).unwrap();

    let raw = fs::read_to_string(store.month_path(key)).unwrap();
    for expected in [
        "\"monthly_salary\"",
        "\"extra_funds\"",
        "\"monthly_bills\"",
        "\"total_savings\"",
        "\"extra-funds\"",
        "\"savings\"",
    ] {
        assert!(raw.contains(expected), "missing {} in:\n{}", expected, raw);
    }
}

#[test]
fn get_all_round_trips_every_saved_month() {
    let temp = tempdir().unwrap();
    let store = JsonMonthStore::new(Some(temp.path().to_path_buf())).unwrap();
    let ledger = sample_ledger();
    for key in ["2026-06", "2026-07", "2026-08"] {
        store.put(key.parse().unwrap(), &ledger).unwrap();
    }

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 3);
    for (_, loaded) in all {
        assert_eq!(loaded, ledger);
    }
}

#[test]
fn settings_persist_across_manager_instances() {
    let temp = tempdir().unwrap();
    let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    manager
        .save(&Settings {
            default_salary: 1750.0,
        })
        .unwrap();

    let reopened = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    assert_eq!(reopened.load().unwrap().default_salary, 1750.0);
}
