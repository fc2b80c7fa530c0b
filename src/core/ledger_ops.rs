//! Pure derived values over a ledger snapshot.
//!
//! Nothing here caches or mutates; every figure is recomputed from the
//! snapshot so no stored field can drift out of sync with the transaction
//! log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MonthlyLedger, Transaction, TransactionKind};

/// Funds still available to spend this month.
///
/// Salary plus extra funds, minus bill spending, one-off expenses, and
/// savings transactions (money already earmarked is not available). A month
/// with no configured salary has nothing to spend from, so the result is 0
/// regardless of the other fields.
pub fn remaining_funds(ledger: &MonthlyLedger) -> f64 {
    let salary = match ledger.monthly_salary {
        Some(salary) => salary,
        None => return 0.0,
    };
    salary + ledger.extra_funds
        - total_for_bills(ledger)
        - total_for_expenses(ledger)
        - manual_savings(ledger)
}

/// Total spent against bills this month.
pub fn total_for_bills(ledger: &MonthlyLedger) -> f64 {
    ledger.monthly_bills.iter().map(|bill| bill.spent).sum()
}

/// Total of one-off expenses this month.
pub fn total_for_expenses(ledger: &MonthlyLedger) -> f64 {
    ledger.expenses.iter().map(|expense| expense.amount).sum()
}

/// Total budgeted across all bills (spent or not).
pub fn total_budgeted(ledger: &MonthlyLedger) -> f64 {
    ledger.monthly_bills.iter().map(|bill| bill.budget).sum()
}

/// Sum of savings-type transactions recorded in this month's log.
pub fn manual_savings(ledger: &MonthlyLedger) -> f64 {
    ledger
        .transactions
        .iter()
        .filter(|txn| txn.kind == TransactionKind::Savings)
        .map(|txn| txn.amount)
        .sum()
}

/// Transactions attached to one bill or expense, newest first.
pub fn transactions_for_item(ledger: &MonthlyLedger, item_id: Uuid) -> Vec<&Transaction> {
    let mut entries: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|txn| txn.item_id == Some(item_id))
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Per-month reporting figures derived from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub income: f64,
    pub bills_spent: f64,
    pub expenses: f64,
    pub saved: f64,
    pub remaining: f64,
}

/// Summarizes a ledger for reporting; `default_salary` stands in when the
/// month has no explicit salary, mirroring how the analytics view treats
/// income.
pub fn summarize(ledger: &MonthlyLedger, default_salary: f64) -> MonthlySummary {
    MonthlySummary {
        income: ledger.monthly_salary.unwrap_or(default_salary) + ledger.extra_funds,
        bills_spent: total_for_bills(ledger),
        expenses: total_for_expenses(ledger),
        saved: manual_savings(ledger),
        remaining: remaining_funds(ledger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bill, Expense};
    use chrono::Utc;

    fn ledger_with_activity() -> MonthlyLedger {
        let mut ledger = MonthlyLedger::empty(Some(1300.0));
        let mut bill = Bill::new("Gas Money", 300.0);
        bill.spent = 50.0;
        ledger.monthly_bills.push(bill);
        ledger
            .expenses
            .push(Expense::new("Groceries", 80.0, Utc::now()));
        ledger.extra_funds = 100.0;
        ledger.add_transaction(Transaction::new(
            TransactionKind::Savings,
            "Personal Savings",
            70.0,
            Utc::now(),
        ));
        ledger
    }

    #[test]
    fn remaining_funds_subtracts_spending_and_earmarked_savings() {
        let ledger = ledger_with_activity();
        // 1300 + 100 - 50 - 80 - 70
        assert_eq!(remaining_funds(&ledger), 1200.0);
    }

    #[test]
    fn remaining_funds_is_zero_without_salary() {
        let mut ledger = ledger_with_activity();
        ledger.monthly_salary = None;
        assert_eq!(remaining_funds(&ledger), 0.0);
    }

    #[test]
    fn totals_are_straight_sums() {
        let ledger = ledger_with_activity();
        assert_eq!(total_for_bills(&ledger), 50.0);
        assert_eq!(total_for_expenses(&ledger), 80.0);
        assert_eq!(total_budgeted(&ledger), 300.0);
        assert_eq!(manual_savings(&ledger), 70.0);
    }

    #[test]
    fn item_history_is_newest_first() {
        let mut ledger = MonthlyLedger::empty(Some(1000.0));
        let bill = Bill::new("Gas Money", 300.0);
        let bill_id = bill.id;
        ledger.monthly_bills.push(bill);
        let early = Utc::now() - chrono::Duration::days(2);
        let late = Utc::now();
        ledger.add_transaction(
            Transaction::new(TransactionKind::Bill, "Gas Money", 10.0, early).with_item(bill_id),
        );
        ledger.add_transaction(
            Transaction::new(TransactionKind::Bill, "Gas Money", 20.0, late).with_item(bill_id),
        );

        let history = transactions_for_item(&ledger, bill_id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, 20.0);
        assert_eq!(history[1].amount, 10.0);
    }

    #[test]
    fn summary_uses_default_salary_when_month_has_none() {
        let mut ledger = ledger_with_activity();
        ledger.monthly_salary = None;
        let summary = summarize(&ledger, 1500.0);
        assert_eq!(summary.income, 1600.0);
        assert_eq!(summary.remaining, 0.0);
        assert_eq!(summary.saved, 70.0);
    }
}
