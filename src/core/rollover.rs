//! The payday state machine.
//!
//! From the 25th of a month onward the app nags the user about payday until
//! they confirm. Declining changes nothing, so the prompt resurfaces on the
//! next check; confirming banks whatever is left into savings, stamps the
//! confirmation, and seeds the following month from the current one.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::config::Settings;
use crate::core::ledger_ops::remaining_funds;
use crate::domain::{MonthKey, MonthlyLedger, Transaction, TransactionKind};

/// Day of month from which the payday prompt fires.
const PAYDAY_PROMPT_DAY: u32 = 25;

/// Category label for the transaction a confirmation banks.
const AUTO_SAVE_CATEGORY: &str = "Auto-Save from Previous Month";

/// What confirming payday computed. Both ledgers are fresh snapshots; the
/// caller persists `current` under the active key and `next` under
/// `next_key` — but only if no ledger exists there yet, which keeps a double
/// confirmation from overwriting a month that already took shape.
#[derive(Debug, Clone)]
pub struct RolloverOutcome {
    pub current: MonthlyLedger,
    pub next_key: MonthKey,
    pub next: MonthlyLedger,
    /// Leftover funds moved into savings; zero when the month closed flat or
    /// negative.
    pub banked: f64,
}

/// Whether the payday prompt is due for the ledger under `active`.
///
/// Fires only for the real-world current month, on or after the prompt day,
/// and only while this month's payday has not been confirmed. The check is
/// stateless and is meant to be re-evaluated on every relevant access:
/// declining the prompt suppresses nothing.
pub fn prompt_due(ledger: &MonthlyLedger, active: MonthKey, today: NaiveDate) -> bool {
    if active != MonthKey::from_date(today) {
        return false;
    }
    if today.day() < PAYDAY_PROMPT_DAY {
        return false;
    }
    match ledger.last_payday_confirmed {
        Some(confirmed) => !active.contains(confirmed),
        None => true,
    }
}

/// Computes the effect of a "Yes, I got paid" confirmation.
///
/// Leftover funds (when positive) become an auto-save transaction and raise
/// `total_savings`; `last_payday_confirmed` is stamped with `today` in every
/// confirmed path. The next month's ledger is derived from the updated
/// current one, so its cumulative savings already include this rollover's
/// contribution.
pub fn confirm(
    ledger: &MonthlyLedger,
    settings: &Settings,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> RolloverOutcome {
    let remaining = remaining_funds(ledger);
    let banked = remaining.max(0.0);

    let mut current = ledger.clone();
    if remaining > 0.0 {
        current.total_savings += remaining;
        current.add_transaction(
            Transaction::new(TransactionKind::Savings, AUTO_SAVE_CATEGORY, remaining, now)
                .with_note("Automatic savings from leftover funds"),
        );
    }
    current.last_payday_confirmed = Some(today);

    let next_key = MonthKey::from_date(today).next();
    let next =
        MonthlyLedger::from_template(&current, settings.default_salary, current.total_savings);
    debug!(%next_key, banked, "payday confirmed");

    RolloverOutcome {
        current,
        next_key,
        next,
        banked,
    }
}
