//! Facade that coordinates ledgers, settings, the clock, and persistence.
//!
//! The processor and the rollover engine are pure; this is the single writer
//! that loads snapshots, runs them through the pure transformations, and
//! puts the results back. Callers serialize access per month key.

use tracing::{debug, info};

use crate::config::Settings;
use crate::core::actions::{self, Action};
use crate::core::errors::BudgetError;
use crate::core::ledger_ops::{self, MonthlySummary};
use crate::core::rollover;
use crate::core::time::Clock;
use crate::domain::{MonthKey, MonthlyLedger};
use crate::storage::MonthStore;

/// What a confirmed payday produced, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaydayConfirmation {
    /// The month the app should now show.
    pub next_key: MonthKey,
    /// Leftover funds moved into savings.
    pub banked: f64,
}

pub struct BudgetManager {
    store: Box<dyn MonthStore>,
    settings: Settings,
    clock: Box<dyn Clock>,
}

impl BudgetManager {
    pub fn new(store: Box<dyn MonthStore>, settings: Settings, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Key of the real-world current month.
    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.clock.today())
    }

    /// Loads the ledger for `key`, creating and persisting an empty default
    /// on first navigation to an unvisited month.
    pub fn ledger(&self, key: MonthKey) -> Result<MonthlyLedger, BudgetError> {
        if let Some(ledger) = self.store.get(key)? {
            return Ok(ledger);
        }
        let ledger = MonthlyLedger::empty(Some(self.settings.default_salary));
        self.store.put(key, &ledger)?;
        debug!(%key, "created empty ledger for unvisited month");
        Ok(ledger)
    }

    /// Applies an action batch to the month under `key` and persists the
    /// result. Returns how many actions took effect.
    pub fn apply_actions(&self, key: MonthKey, batch: &[Action]) -> Result<usize, BudgetError> {
        let ledger = self.ledger(key)?;
        let outcome = actions::apply_batch(&ledger, batch, self.clock.now());
        self.store.put(key, &outcome.ledger)?;
        debug!(%key, applied = outcome.applied, total = batch.len(), "applied action batch");
        Ok(outcome.applied)
    }

    /// Whether the payday prompt should be shown for the month under `key`.
    pub fn payday_prompt_due(&self, key: MonthKey) -> Result<bool, BudgetError> {
        let ledger = self.ledger(key)?;
        Ok(rollover::prompt_due(&ledger, key, self.clock.today()))
    }

    /// Funds left to spend in the month under `key`, for display alongside
    /// the prompt.
    pub fn remaining_funds(&self, key: MonthKey) -> Result<f64, BudgetError> {
        Ok(ledger_ops::remaining_funds(&self.ledger(key)?))
    }

    /// Runs the "Yes, I got paid" transition for the month under `key`.
    ///
    /// The confirmed current ledger always replaces the stored one; the next
    /// month is only written when absent, so confirming twice cannot clobber
    /// a month that already has its own history.
    pub fn confirm_payday(&self, key: MonthKey) -> Result<PaydayConfirmation, BudgetError> {
        let ledger = self.ledger(key)?;
        let outcome = rollover::confirm(
            &ledger,
            &self.settings,
            self.clock.today(),
            self.clock.now(),
        );
        self.store.put(key, &outcome.current)?;
        if self.store.get(outcome.next_key)?.is_none() {
            self.store.put(outcome.next_key, &outcome.next)?;
            info!(next = %outcome.next_key, banked = outcome.banked, "rolled over into new month");
        } else {
            debug!(next = %outcome.next_key, "next month already exists, leaving it untouched");
        }
        Ok(PaydayConfirmation {
            next_key: outcome.next_key,
            banked: outcome.banked,
        })
    }

    /// Updates the process-wide default salary and the salary of the month
    /// under `key`. The caller persists the settings change through its
    /// `SettingsManager`.
    pub fn update_default_salary(
        &mut self,
        salary: f64,
        key: MonthKey,
    ) -> Result<(), BudgetError> {
        if !salary.is_finite() || salary <= 0.0 {
            return Err(BudgetError::InvalidInput(format!(
                "salary must be positive, got {}",
                salary
            )));
        }
        self.settings.default_salary = salary;
        let mut ledger = self.ledger(key)?;
        ledger.monthly_salary = Some(salary);
        self.store.put(key, &ledger)?;
        Ok(())
    }

    /// Reporting figures for the month under `key`.
    pub fn summary(&self, key: MonthKey) -> Result<MonthlySummary, BudgetError> {
        Ok(ledger_ops::summarize(
            &self.ledger(key)?,
            self.settings.default_salary,
        ))
    }
}
