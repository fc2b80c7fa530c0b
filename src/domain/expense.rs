use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A one-off expense, not budgeted against any bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            date,
        }
    }
}
