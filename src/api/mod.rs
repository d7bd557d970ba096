// Boundary with the Fintelli REST backend. Everything above this module
// works with domain types only.

mod client;
pub mod wire;

pub use client::*;

use crate::domain::{
    FixedExpense, FixedExpenseId, NewTransaction, Summary, Transaction, TransactionId,
};

/// Operations the backend offers. [`Client`] talks HTTP; tests provide an
/// in-memory implementation.
pub trait TransactionApi {
    fn list_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    /// The backend's own (cached) summary, normalized to the domain convention.
    fn fetch_summary(&self) -> impl Future<Output = Result<Summary, ClientError>> + Send;

    fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> impl Future<Output = Result<Transaction, ClientError>> + Send;

    fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn list_fixed_expenses(
        &self,
    ) -> impl Future<Output = Result<Vec<FixedExpense>, ClientError>> + Send;

    fn create_fixed_expense(
        &self,
        expense: &FixedExpense,
    ) -> impl Future<Output = Result<FixedExpense, ClientError>> + Send;

    fn delete_fixed_expense(
        &self,
        id: FixedExpenseId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
