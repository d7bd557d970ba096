use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TransactionKind, cents_from_f64, parse_calendar_date};

/// A transaction as entered by the user, before validation and before the
/// sign is normalized from the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCandidate {
    /// `"income"` or `"expense"`. When absent, the sign of `amount` decides.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: String,
    /// `None` when the input was not a number at all.
    pub amount: Option<f64>,
    pub date: String,
}

impl TransactionCandidate {
    /// The kind this candidate resolves to, if exactly one applies.
    pub fn resolved_kind(&self) -> Option<TransactionKind> {
        match &self.kind {
            Some(kind) => TransactionKind::from_str(kind),
            None => self
                .amount
                .and_then(|amount| cents_from_f64(amount).ok())
                .and_then(TransactionKind::from_amount),
        }
    }
}

/// One reason a candidate cannot be submitted. The display text is what the
/// user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Tipo de transação inválido")]
    InvalidKind,

    #[error("Descrição é obrigatória")]
    MissingDescription,

    #[error("Valor deve ser um número diferente de zero")]
    InvalidAmount,

    #[error("Data inválida")]
    InvalidDate,
}

/// Outcome of [`validate_transaction`]: every violated rule, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl std::fmt::Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Check a candidate against all rules. Never fails: the caller decides
/// whether an invalid result blocks submission.
///
/// Rules are reported in a fixed order: kind, description, amount, date.
pub fn validate_transaction(candidate: &TransactionCandidate) -> Validation {
    let mut errors = Vec::new();

    if candidate.resolved_kind().is_none() {
        errors.push(ValidationError::InvalidKind);
    }

    if candidate.description.trim().is_empty() {
        errors.push(ValidationError::MissingDescription);
    }

    // Amounts that round to zero cents are zero for the ledger.
    let amount_ok = candidate
        .amount
        .and_then(|amount| cents_from_f64(amount).ok())
        .is_some_and(|cents| cents != 0);
    if !amount_ok {
        errors.push(ValidationError::InvalidAmount);
    }

    if parse_calendar_date(&candidate.date).is_err() {
        errors.push(ValidationError::InvalidDate);
    }

    Validation { errors }
}
