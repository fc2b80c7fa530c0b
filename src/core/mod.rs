pub mod actions;
pub mod errors;
pub mod ledger_ops;
pub mod manager;
pub mod rollover;
pub mod time;

pub use actions::{Action, ActionError, BatchOutcome};
pub use errors::BudgetError;
pub use manager::{BudgetManager, PaydayConfirmation};
pub use rollover::RolloverOutcome;
pub use time::{Clock, FixedClock, SystemClock};
