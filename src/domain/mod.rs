//! Pure data contracts for the monthly ledger: no behavior beyond
//! constructors, lookups, and the clamping rules the entities own.

pub mod bill;
pub mod expense;
pub mod goal;
pub mod ledger;
pub mod month_key;
pub mod transaction;

pub use bill::Bill;
pub use expense::Expense;
pub use goal::Goal;
pub use ledger::MonthlyLedger;
pub use month_key::MonthKey;
pub use transaction::{Transaction, TransactionKind};
