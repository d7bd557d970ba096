use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::{Cents, Transaction};

/// Aggregate figures over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all positive amounts
    pub income: Cents,
    /// Sum of the magnitudes of all negative amounts (never negative)
    pub expense: Cents,
    /// `income - expense`
    pub balance: Cents,
}

impl Summary {
    pub fn new(income: Cents, expense: Cents) -> Self {
        Self {
            income,
            expense,
            balance: income.saturating_sub(expense),
        }
    }
}

/// Compute the summary for a list of transactions.
/// Positive amounts count as income, negative as expense, zero as neither.
/// Input order does not matter.
///
/// Totals saturate at the `Cents` range instead of overflowing. Amounts read
/// from the backend are bounded by [`MAX_AMOUNT_CENTS`](super::MAX_AMOUNT_CENTS),
/// so real ledgers never get near it.
pub fn compute_summary(transactions: &[Transaction]) -> Summary {
    let (income, expense) = transactions
        .iter()
        .fold((0 as Cents, 0 as Cents), |(income, expense), transaction| {
            match transaction.amount_cents {
                amount if amount > 0 => (income.saturating_add(amount), expense),
                amount if amount < 0 => (income, expense.saturating_sub(amount)),
                _ => (income, expense),
            }
        });
    Summary::new(income, expense)
}

/// Order transactions newest first, ties by id descending.
/// Records without an id are not stored yet and go first within their date.
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|t| {
        (
            Reverse(t.transaction_date),
            Reverse(t.id.unwrap_or(i64::MAX)),
        )
    });
}
