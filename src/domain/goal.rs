use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multi-month savings target, optionally fed by payments on a linked bill.
///
/// `current_amount` only moves as a side effect of bill payments (and their
/// deletion) and is always clamped to `[0, total_amount]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub total_amount: f64,
    pub current_amount: f64,
    pub monthly_payment: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, total_amount: f64, monthly_payment: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_amount,
            current_amount: 0.0,
            monthly_payment,
        }
    }

    /// Advances progress by a payment amount, clamped at the target.
    pub fn record_payment(&mut self, amount: f64) {
        self.current_amount = (self.current_amount + amount).min(self.total_amount);
    }

    /// Reverses a payment, clamped at zero.
    pub fn reverse_payment(&mut self, amount: f64) {
        self.current_amount = (self.current_amount - amount).max(0.0);
    }
}
