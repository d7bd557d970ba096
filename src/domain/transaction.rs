use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cents, TransactionCandidate, Validation, cents_from_f64, parse_calendar_date};

/// Identifier assigned by the backend store.
pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Classify a signed amount. Zero belongs to neither kind.
    pub fn from_amount(amount_cents: Cents) -> Option<Self> {
        match amount_cents.signum() {
            1 => Some(TransactionKind::Income),
            -1 => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Apply this kind's sign to a magnitude.
    pub fn signed(&self, amount_cents: Cents) -> Cents {
        match self {
            TransactionKind::Income => amount_cents.abs(),
            TransactionKind::Expense => -amount_cents.abs(),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. The sign of `amount_cents` carries the kind:
/// positive is income, negative is expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<TransactionId>,
    pub description: String,
    pub amount_cents: Cents,
    pub transaction_date: NaiveDate,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount_cents,
            transaction_date,
        }
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    /// `None` for zero-amount records.
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::from_amount(self.amount_cents)
    }

    pub fn is_income(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount_cents < 0
    }
}

/// A validated, sign-normalized record ready to be submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount_cents: Cents,
    pub transaction_date: NaiveDate,
}

impl NewTransaction {
    /// Validate a candidate and normalize its sign from the declared kind:
    /// expenses become negative, income positive, whatever sign was typed.
    pub fn from_candidate(candidate: &TransactionCandidate) -> Result<Self, Validation> {
        let validation = super::validate_transaction(candidate);
        if !validation.is_valid() {
            return Err(validation);
        }

        // Validation guarantees every field below resolves.
        let (Some(amount), Ok(transaction_date)) =
            (candidate.amount, parse_calendar_date(&candidate.date))
        else {
            return Err(validation);
        };
        let Ok(magnitude) = cents_from_f64(amount) else {
            return Err(validation);
        };
        let Some(kind) = candidate.resolved_kind() else {
            return Err(validation);
        };

        Ok(Self {
            description: candidate.description.trim().to_string(),
            amount_cents: kind.signed(magnitude),
            transaction_date,
        })
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::from_amount(self.amount_cents)
    }

    /// The record as the backend will return it once stored under `id`.
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id: Some(id),
            description: self.description,
            amount_cents: self.amount_cents,
            transaction_date: self.transaction_date,
        }
    }
}
