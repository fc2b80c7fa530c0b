//! The closed action vocabulary and the processor that applies it.
//!
//! An action batch comes from a user form or an assistant reply. Each action
//! is validated and applied against a progressively updated snapshot; an
//! action that fails validation is skipped and the rest of the batch still
//! runs. The caller learns only how many actions were applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Bill, Expense, Goal, MonthlyLedger, Transaction, TransactionKind};

/// One semantic mutation of a monthly ledger.
///
/// The wire tags match what the assistant emits (`ADD_BILL`, `REMOVE_BILL`,
/// ...). Tags outside the vocabulary deserialize to [`Action::Unknown`],
/// which is always a no-op rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddBill {
        name: String,
        budget: f64,
    },
    RemoveBill {
        id: Uuid,
    },
    UpdateBillBudget {
        id: Uuid,
        budget: f64,
    },
    AddBillPayment {
        id: Uuid,
        amount: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    AddExpense {
        name: String,
        amount: f64,
    },
    RemoveExpense {
        id: Uuid,
    },
    AddGoal {
        name: String,
        total_amount: f64,
        monthly_payment: f64,
    },
    RemoveGoal {
        id: Uuid,
    },
    UpdateGoalMonthlyPayment {
        id: Uuid,
        payment: f64,
    },
    AddToSavings {
        amount: f64,
    },
    AddExtraFunds {
        amount: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    UpdateSalary {
        amount: f64,
    },
    DeleteTransaction {
        id: Uuid,
    },
    ToggleBillPaid {
        id: Uuid,
    },
    SetBillPinned {
        id: Uuid,
        pinned: bool,
    },
    /// Any tag outside the vocabulary. Never applied, never fatal.
    #[serde(other)]
    Unknown,
}

/// Why a single action was rejected. Batch processing absorbs these.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("invalid action: {0}")]
    Invalid(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
}

/// Result of applying a batch: the final snapshot plus how many actions took
/// effect.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub ledger: MonthlyLedger,
    pub applied: usize,
}

/// Applies one action to a snapshot, producing a new snapshot.
///
/// `now` stamps any transaction the action emits; the processor itself never
/// consults the real clock.
pub fn apply(
    ledger: &MonthlyLedger,
    action: &Action,
    now: DateTime<Utc>,
) -> Result<MonthlyLedger, ActionError> {
    let mut next = ledger.clone();
    match action {
        Action::AddBill { name, budget } => {
            let name = valid_name(name)?;
            let budget = positive(*budget, "budget")?;
            next.monthly_bills.push(Bill::new(name, budget));
        }
        Action::RemoveBill { id } => {
            next.remove_bill(*id).ok_or(ActionError::NotFound {
                entity: "bill",
                id: *id,
            })?;
        }
        Action::UpdateBillBudget { id, budget } => {
            let budget = non_negative(*budget, "budget")?;
            let bill = next.bill_mut(*id).ok_or(ActionError::NotFound {
                entity: "bill",
                id: *id,
            })?;
            // Budget edits never touch `spent`.
            bill.budget = budget;
        }
        Action::AddBillPayment { id, amount, note } => {
            let amount = positive(*amount, "amount")?;
            let bill = next.bill_mut(*id).ok_or(ActionError::NotFound {
                entity: "bill",
                id: *id,
            })?;
            bill.spent += amount;
            let category = bill.name.clone();
            let linked_goal = bill.linked_goal_id;
            if let Some(goal_id) = linked_goal {
                if let Some(goal) = next.goal_mut(goal_id) {
                    goal.record_payment(amount);
                }
            }
            let mut txn =
                Transaction::new(TransactionKind::Bill, category, amount, now).with_item(*id);
            if let Some(note) = note {
                txn = txn.with_note(note.clone());
            }
            next.add_transaction(txn);
        }
        Action::AddExpense { name, amount } => {
            let name = valid_name(name)?;
            let amount = positive(*amount, "amount")?;
            let expense = Expense::new(name.clone(), amount, now);
            let txn = Transaction::new(TransactionKind::Expense, name, amount, now)
                .with_item(expense.id);
            next.expenses.push(expense);
            next.add_transaction(txn);
        }
        Action::RemoveExpense { id } => {
            next.remove_expense(*id).ok_or(ActionError::NotFound {
                entity: "expense",
                id: *id,
            })?;
        }
        Action::AddGoal {
            name,
            total_amount,
            monthly_payment,
        } => {
            let name = valid_name(name)?;
            let total_amount = positive(*total_amount, "total_amount")?;
            let monthly_payment = non_negative(*monthly_payment, "monthly_payment")?;
            let goal = Goal::new(name.clone(), total_amount, monthly_payment);
            // Every goal gets a companion bill so its monthly payment shows
            // up in the bill list and feeds the goal when paid.
            let companion = Bill::new(format!("{} Payment", name), monthly_payment)
                .with_linked_goal(goal.id);
            next.goals.push(goal);
            next.monthly_bills.push(companion);
        }
        Action::RemoveGoal { id } => {
            next.remove_goal(*id).ok_or(ActionError::NotFound {
                entity: "goal",
                id: *id,
            })?;
        }
        Action::UpdateGoalMonthlyPayment { id, payment } => {
            let payment = non_negative(*payment, "payment")?;
            let goal = next.goal_mut(*id).ok_or(ActionError::NotFound {
                entity: "goal",
                id: *id,
            })?;
            goal.monthly_payment = payment;
            for bill in next
                .monthly_bills
                .iter_mut()
                .filter(|bill| bill.linked_goal_id == Some(*id))
            {
                bill.budget = payment;
            }
        }
        Action::AddToSavings { amount } => {
            let amount = positive(*amount, "amount")?;
            next.total_savings += amount;
            next.add_transaction(Transaction::new(
                TransactionKind::Savings,
                "Personal Savings",
                amount,
                now,
            ));
        }
        Action::AddExtraFunds { amount, note } => {
            let amount = positive(*amount, "amount")?;
            next.extra_funds += amount;
            let mut txn = Transaction::new(TransactionKind::ExtraFunds, "Extra Funds", amount, now);
            if let Some(note) = note {
                txn = txn.with_note(note.clone());
            }
            next.add_transaction(txn);
        }
        Action::UpdateSalary { amount } => {
            let amount = positive(*amount, "amount")?;
            next.monthly_salary = Some(amount);
        }
        Action::DeleteTransaction { id } => {
            delete_transaction(&mut next, *id)?;
        }
        Action::ToggleBillPaid { id } => {
            let bill = next.bill_mut(*id).ok_or(ActionError::NotFound {
                entity: "bill",
                id: *id,
            })?;
            bill.is_paid = !bill.is_paid;
        }
        Action::SetBillPinned { id, pinned } => {
            let bill = next.bill_mut(*id).ok_or(ActionError::NotFound {
                entity: "bill",
                id: *id,
            })?;
            bill.pinned = *pinned;
        }
        Action::Unknown => {}
    }
    Ok(next)
}

/// Applies a batch in order against progressively updated snapshots.
///
/// A failed action is skipped without aborting the remainder; only the count
/// of applied actions is reported. Unknown action types are ignored.
pub fn apply_batch(ledger: &MonthlyLedger, actions: &[Action], now: DateTime<Utc>) -> BatchOutcome {
    let mut current = ledger.clone();
    let mut applied = 0;
    for action in actions {
        if matches!(action, Action::Unknown) {
            debug!("ignoring unknown action type");
            continue;
        }
        match apply(&current, action, now) {
            Ok(next) => {
                current = next;
                applied += 1;
            }
            Err(err) => {
                warn!(%err, ?action, "skipping action");
            }
        }
    }
    BatchOutcome {
        ledger: current,
        applied,
    }
}

/// Removes a transaction after exactly undoing its effect. All reversals are
/// floor-clamped at zero.
fn delete_transaction(ledger: &mut MonthlyLedger, id: Uuid) -> Result<(), ActionError> {
    let txn = ledger
        .transaction(id)
        .cloned()
        .ok_or(ActionError::NotFound {
            entity: "transaction",
            id,
        })?;
    match txn.kind {
        TransactionKind::Bill => {
            let mut linked_goal = None;
            if let Some(bill) = txn.item_id.and_then(|item| ledger.bill_mut(item)) {
                bill.spent = (bill.spent - txn.amount).max(0.0);
                linked_goal = bill.linked_goal_id;
            }
            if let Some(goal) = linked_goal.and_then(|goal_id| ledger.goal_mut(goal_id)) {
                goal.reverse_payment(txn.amount);
            }
        }
        TransactionKind::Expense => {
            if let Some(item) = txn.item_id {
                ledger.expenses.retain(|expense| expense.id != item);
            }
        }
        TransactionKind::Savings => {
            ledger.total_savings = (ledger.total_savings - txn.amount).max(0.0);
        }
        TransactionKind::ExtraFunds => {
            ledger.extra_funds = (ledger.extra_funds - txn.amount).max(0.0);
        }
        // Goal entries move no money directly; removing the record is enough.
        TransactionKind::Goal => {}
    }
    ledger.transactions.retain(|txn| txn.id != id);
    Ok(())
}

fn valid_name(name: &str) -> Result<String, ActionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ActionError::Invalid("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn positive(value: f64, field: &str) -> Result<f64, ActionError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ActionError::Invalid(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(value)
}

fn non_negative(value: f64, field: &str) -> Result<f64, ActionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ActionError::Invalid(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(value)
}
