//! Payloads exchanged with the Fintelli backend and their adapters to the
//! domain model.
//!
//! The backend speaks decimal amounts as JSON numbers and dates as
//! `YYYY-MM-DD` strings. Some producers send a `type` tag with an unsigned
//! amount instead of a signed amount; both shapes are accepted here and
//! nothing past this module sees the difference. Single amounts are bounded
//! to what the backend stores (see [`MAX_AMOUNT_CENTS`](crate::domain::MAX_AMOUNT_CENTS)).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    Cents, FixedExpense, FixedExpenseId, InvalidInputError, MoneyError, NewTransaction, Summary,
    Transaction, TransactionId, TransactionKind, amount_from_f64, cents_from_f64, cents_to_f64,
    parse_calendar_date,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    #[error("invalid date: {0}")]
    InvalidDate(#[from] InvalidInputError),

    #[error("unknown transaction type: {0:?}")]
    UnknownKind(String),

    #[error("summary balance {balance} does not match income {income} and expense {expense}")]
    InconsistentSummary {
        income: Cents,
        expense: Cents,
        balance: Cents,
    },
}

/// Transaction in the backend's own shape: signed amount, no type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    pub description: String,
    pub amount: f64,
    pub transaction_date: String,
}

impl TryFrom<ApiTransaction> for Transaction {
    type Error = AdapterError;

    fn try_from(api: ApiTransaction) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: api.id,
            description: api.description,
            amount_cents: amount_from_f64(api.amount)?,
            transaction_date: parse_calendar_date(&api.transaction_date)?,
        })
    }
}

impl From<&Transaction> for ApiTransaction {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            description: transaction.description.clone(),
            amount: cents_to_f64(transaction.amount_cents),
            transaction_date: transaction.transaction_date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&NewTransaction> for ApiTransaction {
    fn from(transaction: &NewTransaction) -> Self {
        Self {
            id: None,
            description: transaction.description.clone(),
            amount: cents_to_f64(transaction.amount_cents),
            transaction_date: transaction.transaction_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Inbound transaction in either convention.
///
/// The backend sends a signed `amount` with `transaction_date`. Other
/// producers send a `type` tag with an unsigned `amount`, and may call the
/// date `date`. The two choices are independent: whenever a tag is present
/// it decides the sign, whatever the date field is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(alias = "date")]
    pub transaction_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = AdapterError;

    fn try_from(wire: WireTransaction) -> Result<Self, Self::Error> {
        let amount_cents = amount_from_f64(wire.amount)?;
        let amount_cents = match wire.kind.as_deref() {
            Some(tag) => TransactionKind::from_str(tag)
                .ok_or_else(|| AdapterError::UnknownKind(tag.to_string()))?
                .signed(amount_cents),
            None => amount_cents,
        };
        Ok(Transaction {
            id: wire.id,
            description: wire.description,
            amount_cents,
            transaction_date: parse_calendar_date(&wire.transaction_date)?,
        })
    }
}

/// Summary as reported by `GET /summary`. The backend sums expenses as a
/// negative number and reports `balance = income + expense`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl TryFrom<ApiSummary> for Summary {
    type Error = AdapterError;

    fn try_from(api: ApiSummary) -> Result<Self, Self::Error> {
        let income = cents_from_f64(api.income)?;
        let expense = cents_from_f64(api.expense)?.abs();
        let balance = cents_from_f64(api.balance)?;
        let summary = Summary::new(income, expense);

        // Each figure is rounded on its own, so allow one cent of slack.
        if summary.balance.abs_diff(balance) > 1 {
            return Err(AdapterError::InconsistentSummary {
                income,
                expense,
                balance,
            });
        }
        Ok(summary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFixedExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FixedExpenseId>,
    pub description: String,
    pub amount: f64,
}

impl TryFrom<ApiFixedExpense> for FixedExpense {
    type Error = AdapterError;

    fn try_from(api: ApiFixedExpense) -> Result<Self, Self::Error> {
        Ok(FixedExpense {
            id: api.id,
            description: api.description,
            amount_cents: amount_from_f64(api.amount)?,
        })
    }
}

impl From<&FixedExpense> for ApiFixedExpense {
    fn from(expense: &FixedExpense) -> Self {
        Self {
            id: expense.id,
            description: expense.description.clone(),
            amount: cents_to_f64(expense.amount_cents),
        }
    }
}
