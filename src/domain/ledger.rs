use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bill, Expense, Goal, Transaction};

/// The full financial state for one calendar month.
///
/// Snapshots are cheap to clone; the action processor and the rollover
/// engine always build a new snapshot rather than mutating one shared
/// between callers. `total_savings` is cumulative across months and is
/// carried forward on rollover, never reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyLedger {
    pub monthly_salary: Option<f64>,
    pub extra_funds: f64,
    #[serde(default)]
    pub monthly_bills: Vec<Bill>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub total_savings: f64,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Set only when the user explicitly confirms payday for this month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payday_confirmed: Option<NaiveDate>,
}

impl MonthlyLedger {
    /// Empty ledger for a first visit to a month, seeded with the default
    /// salary when one is configured.
    pub fn empty(default_salary: Option<f64>) -> Self {
        Self {
            monthly_salary: default_salary,
            extra_funds: 0.0,
            monthly_bills: Vec::new(),
            expenses: Vec::new(),
            total_savings: 0.0,
            goals: Vec::new(),
            transactions: Vec::new(),
            last_payday_confirmed: None,
        }
    }

    /// Seeds a new month from a template ledger: salary carried over (or the
    /// default when the template has none), bills reset to unspent/unpaid,
    /// goals carried verbatim so progress survives, one-off state cleared.
    /// Cumulative savings are supplied by the caller, which knows how much
    /// the rollover just banked.
    pub fn from_template(template: &Self, default_salary: f64, total_savings: f64) -> Self {
        Self {
            monthly_salary: Some(template.monthly_salary.unwrap_or(default_salary)),
            extra_funds: 0.0,
            monthly_bills: template
                .monthly_bills
                .iter()
                .map(Bill::reset_for_new_month)
                .collect(),
            expenses: Vec::new(),
            total_savings,
            goals: template.goals.clone(),
            transactions: Vec::new(),
            last_payday_confirmed: None,
        }
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.monthly_bills.iter().find(|bill| bill.id == id)
    }

    pub fn bill_mut(&mut self, id: Uuid) -> Option<&mut Bill> {
        self.monthly_bills.iter_mut().find(|bill| bill.id == id)
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    /// Drops a bill together with its transaction history.
    pub fn remove_bill(&mut self, id: Uuid) -> Option<Bill> {
        let index = self.monthly_bills.iter().position(|bill| bill.id == id)?;
        let bill = self.monthly_bills.remove(index);
        self.transactions.retain(|txn| txn.item_id != Some(id));
        Some(bill)
    }

    /// Drops an expense together with its transaction history.
    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let expense = self.expenses.remove(index);
        self.transactions.retain(|txn| txn.item_id != Some(id));
        Some(expense)
    }

    /// Drops a goal, its companion bills, and the bills' transactions.
    pub fn remove_goal(&mut self, id: Uuid) -> Option<Goal> {
        let index = self.goals.iter().position(|goal| goal.id == id)?;
        let goal = self.goals.remove(index);
        let companion_ids: Vec<Uuid> = self
            .monthly_bills
            .iter()
            .filter(|bill| bill.linked_goal_id == Some(id))
            .map(|bill| bill.id)
            .collect();
        self.monthly_bills
            .retain(|bill| bill.linked_goal_id != Some(id));
        self.transactions.retain(|txn| match txn.item_id {
            Some(item) => !companion_ids.contains(&item),
            None => true,
        });
        Some(goal)
    }
}
