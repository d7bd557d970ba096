use serde::{Deserialize, Serialize};

use super::Cents;

pub type FixedExpenseId = i64;

/// A recurring monthly cost (rent, internet, subscriptions).
/// The amount is the positive monthly cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: Option<FixedExpenseId>,
    pub description: String,
    pub amount_cents: Cents,
}

impl FixedExpense {
    pub fn new(description: impl Into<String>, amount_cents: Cents) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount_cents,
        }
    }

    pub fn with_id(mut self, id: FixedExpenseId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Total monthly cost of all fixed expenses, saturating at the `Cents` range.
pub fn total_fixed_expenses(expenses: &[FixedExpense]) -> Cents {
    expenses
        .iter()
        .fold(0, |total: Cents, e| total.saturating_add(e.amount_cents))
}

/// Order fixed expenses by description, as the backend lists them.
pub fn sort_by_description(expenses: &mut [FixedExpense]) {
    expenses.sort_by(|a, b| a.description.cmp(&b.description));
}
