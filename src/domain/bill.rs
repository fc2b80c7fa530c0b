use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring budgeted category, tracked against a monthly budget.
///
/// `spent` accumulates through payment transactions only; editing the budget
/// never touches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_goal_id: Option<Uuid>,
    #[serde(default)]
    pub pinned: bool,
}

impl Bill {
    /// Creates a fresh bill with nothing spent against it yet.
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            budget,
            spent: 0.0,
            is_paid: false,
            linked_goal_id: None,
            pinned: false,
        }
    }

    /// Links payments on this bill to a savings goal.
    pub fn with_linked_goal(mut self, goal_id: Uuid) -> Self {
        self.linked_goal_id = Some(goal_id);
        self
    }

    /// Copy for a new month: same name/budget/link, progress reset.
    pub fn reset_for_new_month(&self) -> Self {
        Self {
            spent: 0.0,
            is_paid: false,
            ..self.clone()
        }
    }
}
