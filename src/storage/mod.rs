pub mod json_backend;

use std::collections::BTreeMap;

use crate::core::errors::BudgetError;
use crate::domain::{MonthKey, MonthlyLedger};

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Abstraction over persistence backends keyed by month.
///
/// A missing month is `Ok(None)`, never an error: the core treats absence as
/// "needs default or template creation". Durability timing is the caller's
/// concern; the core only requires that the latest snapshot eventually
/// lands.
pub trait MonthStore: Send + Sync {
    fn get(&self, key: MonthKey) -> Result<Option<MonthlyLedger>>;
    fn put(&self, key: MonthKey, ledger: &MonthlyLedger) -> Result<()>;
    fn get_all(&self) -> Result<BTreeMap<MonthKey, MonthlyLedger>>;
}

pub use json_backend::JsonMonthStore;
