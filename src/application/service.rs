use serde::{Deserialize, Serialize};

use crate::api::{ClientError, TransactionApi};
use crate::domain::{
    Cents, FixedExpense, FixedExpenseId, NewTransaction, Summary, Transaction, TransactionCandidate,
    TransactionId, compute_summary, sort_by_description, sort_for_display, total_fixed_expenses,
};

use super::AppError;

/// Application service providing the use cases of the finance client.
/// This is the primary interface for any front end (CLI, TUI, web, ...).
pub struct LedgerService<A> {
    api: A,
}

/// Transactions in display order plus the summary recomputed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub transactions: Vec<Transaction>,
}

/// Backend summary compared against the one recomputed from its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCheck {
    pub local: Summary,
    pub remote: Summary,
}

impl SummaryCheck {
    pub fn is_consistent(&self) -> bool {
        self.local == self.remote
    }
}

/// Fixed expenses sorted by description, with their monthly total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpenseList {
    pub expenses: Vec<FixedExpense>,
    pub total: Cents,
}

impl<A: TransactionApi> LedgerService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ========================
    // Transaction operations
    // ========================

    /// Fetch all transactions, newest first, with a freshly computed summary.
    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        let transactions = self.list_transactions().await?;
        let summary = compute_summary(&transactions);
        Ok(Dashboard {
            summary,
            transactions,
        })
    }

    /// Fetch all transactions, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        let mut transactions = self.api.list_transactions().await?;
        sort_for_display(&mut transactions);
        Ok(transactions)
    }

    /// Validate a candidate, normalize its sign and submit it.
    /// Nothing is sent when validation fails. A record the server refuses
    /// comes back as [`AppError::TransactionRejected`] with its detail.
    pub async fn add_transaction(
        &self,
        candidate: &TransactionCandidate,
    ) -> Result<Transaction, AppError> {
        let new = NewTransaction::from_candidate(candidate).map_err(|validation| {
            tracing::debug!(%validation, "rejected transaction candidate");
            AppError::InvalidTransaction(validation)
        })?;

        let created = match self.api.create_transaction(&new).await {
            Ok(created) => created,
            Err(ClientError::Validation(detail)) => {
                tracing::warn!(%detail, "server rejected transaction");
                return Err(AppError::TransactionRejected(detail));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(
            id = ?created.id,
            amount_cents = created.amount_cents,
            "transaction created"
        );
        Ok(created)
    }

    /// Delete a transaction by id.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
        match self.api.delete_transaction(id).await {
            Ok(()) => {
                tracing::info!(id, "transaction deleted");
                Ok(())
            }
            Err(ClientError::NotFound) => Err(AppError::TransactionNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Compare the backend's summary with one recomputed from its records.
    /// The backend caches its summary, so the two may briefly disagree.
    pub async fn check_summary(&self) -> Result<SummaryCheck, AppError> {
        let remote = self.api.fetch_summary().await?;
        let transactions = self.api.list_transactions().await?;
        let check = SummaryCheck {
            local: compute_summary(&transactions),
            remote,
        };
        if !check.is_consistent() {
            tracing::warn!(local = ?check.local, remote = ?check.remote, "summary drift");
        }
        Ok(check)
    }

    // ========================
    // Fixed expense operations
    // ========================

    pub async fn list_fixed_expenses(&self) -> Result<FixedExpenseList, AppError> {
        let mut expenses = self.api.list_fixed_expenses().await?;
        sort_by_description(&mut expenses);
        let total = total_fixed_expenses(&expenses);
        Ok(FixedExpenseList { expenses, total })
    }

    /// Record a fixed monthly expense. The amount must be positive.
    pub async fn add_fixed_expense(
        &self,
        description: &str,
        amount_cents: Cents,
    ) -> Result<FixedExpense, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::InvalidFixedExpense(
                "description is required".to_string(),
            ));
        }
        if amount_cents <= 0 {
            return Err(AppError::InvalidFixedExpense(
                "amount must be positive".to_string(),
            ));
        }

        let created = self
            .api
            .create_fixed_expense(&FixedExpense::new(description, amount_cents))
            .await?;
        tracing::info!(id = ?created.id, amount_cents, "fixed expense created");
        Ok(created)
    }

    pub async fn delete_fixed_expense(&self, id: FixedExpenseId) -> Result<(), AppError> {
        match self.api.delete_fixed_expense(id).await {
            Ok(()) => {
                tracing::info!(id, "fixed expense deleted");
                Ok(())
            }
            Err(ClientError::NotFound) => Err(AppError::FixedExpenseNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
