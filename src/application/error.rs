use thiserror::Error;

use crate::api::ClientError;
use crate::domain::{FixedExpenseId, TransactionId, Validation};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(Validation),

    #[error("Transaction rejected by the server: {0}")]
    TransactionRejected(String),

    #[error("Invalid fixed expense: {0}")]
    InvalidFixedExpense(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Fixed expense not found: {0}")]
    FixedExpenseNotFound(FixedExpenseId),

    #[error("API error: {0}")]
    Api(#[from] ClientError),
}
