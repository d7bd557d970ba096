// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use fintelli::api::{ClientError, TransactionApi};
use fintelli::application::LedgerService;
use fintelli::domain::{
    Cents, FixedExpense, FixedExpenseId, NewTransaction, Summary, Transaction, TransactionId,
    compute_summary,
};

/// Helper to parse a YYYY-MM-DD date
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn transaction(id: TransactionId, description: &str, amount: Cents, date: &str) -> Transaction {
    Transaction::new(description, amount, parse_date(date)).with_id(id)
}

/// Salary, freelance income, rent and groceries in January 2024.
pub fn january_transactions() -> Vec<Transaction> {
    vec![
        transaction(1, "Salário", 500000, "2024-01-05"),
        transaction(2, "Freelance", 100000, "2024-01-12"),
        transaction(3, "Aluguel", -80000, "2024-01-10"),
        transaction(4, "Mercado", -20000, "2024-01-12"),
    ]
}

#[derive(Default)]
struct FakeState {
    transactions: Vec<Transaction>,
    fixed_expenses: Vec<FixedExpense>,
    next_id: i64,
    cached_summary: Option<Summary>,
    failing: bool,
    rejection: Option<String>,
    requests: usize,
}

/// In-memory stand-in for the Fintelli backend.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().filter_map(|t| t.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(FakeState {
                transactions,
                next_id,
                ..FakeState::default()
            }),
        }
    }

    /// Make `fetch_summary` return a stale value instead of recomputing.
    pub fn set_cached_summary(&self, summary: Summary) {
        self.state.lock().unwrap().cached_summary = Some(summary);
    }

    /// Make every request fail with a server error.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    /// Make `create_transaction` answer 422 with `detail`.
    pub fn reject_transactions_with(&self, detail: &str) {
        self.state.lock().unwrap().rejection = Some(detail.to_string());
    }

    pub fn stored_transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, FakeState>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        if state.failing {
            return Err(ClientError::Server {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(state)
    }
}

impl TransactionApi for FakeApi {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        Ok(self.begin()?.transactions.clone())
    }

    async fn fetch_summary(&self) -> Result<Summary, ClientError> {
        let state = self.begin()?;
        Ok(state
            .cached_summary
            .unwrap_or_else(|| compute_summary(&state.transactions)))
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ClientError> {
        let mut state = self.begin()?;
        if let Some(detail) = &state.rejection {
            return Err(ClientError::Validation(detail.clone()));
        }
        state.next_id += 1;
        let stored = transaction.clone().into_transaction(state.next_id);
        state.transactions.push(stored.clone());
        state.cached_summary = None;
        Ok(stored)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), ClientError> {
        let mut state = self.begin()?;
        let before = state.transactions.len();
        state.transactions.retain(|t| t.id != Some(id));
        if state.transactions.len() == before {
            return Err(ClientError::NotFound);
        }
        state.cached_summary = None;
        Ok(())
    }

    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>, ClientError> {
        Ok(self.begin()?.fixed_expenses.clone())
    }

    async fn create_fixed_expense(
        &self,
        expense: &FixedExpense,
    ) -> Result<FixedExpense, ClientError> {
        let mut state = self.begin()?;
        state.next_id += 1;
        let stored = expense.clone().with_id(state.next_id);
        state.fixed_expenses.push(stored.clone());
        Ok(stored)
    }

    async fn delete_fixed_expense(&self, id: FixedExpenseId) -> Result<(), ClientError> {
        let mut state = self.begin()?;
        let before = state.fixed_expenses.len();
        state.fixed_expenses.retain(|e| e.id != Some(id));
        if state.fixed_expenses.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }
}

/// Helper to create a service over a fake backend holding `transactions`
pub fn test_service(transactions: Vec<Transaction>) -> LedgerService<FakeApi> {
    LedgerService::new(FakeApi::with_transactions(transactions))
}
