//! Presentation state for a dashboard front end.
//!
//! The state is a plain serializable value. It only changes through
//! [`reduce`], which is pure: the caller performs I/O and feeds the outcome
//! back in as an [`Action`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Summary, Transaction, TransactionCandidate, TransactionId, TransactionKind, cents_to_f64, compute_summary, parse_cents, sort_for_display, validate_transaction,
};

pub const SUBMIT_FAILED_MESSAGE: &str = "Não foi possível adicionar a transação. Tente novamente.";
pub const DELETE_FAILED_MESSAGE: &str = "Falha ao apagar a transação.";
pub const LOAD_FAILED_MESSAGE: &str = "Falha ao carregar os dados.";
pub const ADDED_NOTICE: &str = "Lançamento adicionado.";
pub const DELETED_NOTICE: &str = "Lançamento apagado.";

/// The new-transaction form, holding raw text as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl FormState {
    /// Empty income form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Income,
            description: String::new(),
            amount: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn to_candidate(&self) -> TransactionCandidate {
        TransactionCandidate {
            kind: Some(self.kind.as_str().to_string()),
            description: self.description.clone(),
            amount: parse_cents(&self.amount).ok().map(cents_to_f64),
            date: self.date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub summary: Summary,
    /// Newest first
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub submitting: bool,
    pub form: FormState,
    /// Messages for the user, replaced on every failed step
    pub errors: Vec<String>,
    pub notice: Option<String>,
}

impl DashboardState {
    /// Initial state: nothing loaded yet and a load pending.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            summary: Summary::default(),
            transactions: Vec::new(),
            loading: true,
            submitting: false,
            form: FormState::new(today),
            errors: Vec::new(),
            notice: None,
        }
    }

    fn set_transactions(&mut self, mut transactions: Vec<Transaction>) {
        sort_for_display(&mut transactions);
        self.summary = compute_summary(&transactions);
        self.transactions = transactions;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    LoadStarted,
    Loaded(Vec<Transaction>),
    LoadFailed,
    SetKind(TransactionKind),
    SetDescription(String),
    SetAmount(String),
    SetDate(String),
    /// Validates the form; only a valid form enters the submitting state.
    SubmitStarted,
    /// The record was refused, either by local validation or by the
    /// backend. Carries the messages to show.
    SubmitRejected(Vec<String>),
    SubmitSucceeded {
        transaction: Transaction,
        today: NaiveDate,
    },
    SubmitFailed,
    Deleted(TransactionId),
    DeleteFailed,
}

/// Apply one action. The summary is always recomputed from the resulting
/// transaction list.
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::LoadStarted => {
            state.loading = true;
        }
        Action::Loaded(transactions) => {
            state.set_transactions(transactions);
            state.loading = false;
        }
        Action::LoadFailed => {
            state.loading = false;
            state.errors = vec![LOAD_FAILED_MESSAGE.to_string()];
        }
        Action::SetKind(kind) => {
            state.form.kind = kind;
            state.errors.clear();
        }
        Action::SetDescription(description) => {
            state.form.description = description;
            state.errors.clear();
        }
        Action::SetAmount(amount) => {
            state.form.amount = amount;
            state.errors.clear();
        }
        Action::SetDate(date) => {
            state.form.date = date;
            state.errors.clear();
        }
        Action::SubmitStarted => {
            if state.submitting {
                return state;
            }
            let validation = validate_transaction(&state.form.to_candidate());
            state.notice = None;
            if validation.is_valid() {
                state.submitting = true;
                state.errors.clear();
            } else {
                state.errors = validation.messages();
            }
        }
        Action::SubmitRejected(messages) => {
            state.submitting = false;
            state.errors = messages;
        }
        Action::SubmitSucceeded { transaction, today } => {
            let mut transactions = std::mem::take(&mut state.transactions);
            transactions.push(transaction);
            state.set_transactions(transactions);
            state.submitting = false;
            state.form = FormState::new(today);
            state.errors.clear();
            state.notice = Some(ADDED_NOTICE.to_string());
        }
        Action::SubmitFailed => {
            state.submitting = false;
            state.errors = vec![SUBMIT_FAILED_MESSAGE.to_string()];
        }
        Action::Deleted(id) => {
            let mut transactions = std::mem::take(&mut state.transactions);
            transactions.retain(|t| t.id != Some(id));
            state.set_transactions(transactions);
            state.errors.clear();
            state.notice = Some(DELETED_NOTICE.to_string());
        }
        Action::DeleteFailed => {
            state.errors = vec![DELETE_FAILED_MESSAGE.to_string()];
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_form_defaults() {
        let form = FormState::new(today());
        assert_eq!(form.kind, TransactionKind::Income);
        assert_eq!(form.date, "2024-01-15");
        assert!(form.description.is_empty());
        assert!(form.amount.is_empty());
    }

    #[test]
    fn test_form_candidate_parses_amount() {
        let mut form = FormState::new(today());
        form.amount = "1234,56".to_string();
        assert_eq!(form.to_candidate().amount, Some(1234.56));

        form.amount = "abc".to_string();
        assert_eq!(form.to_candidate().amount, None);
    }

    #[test]
    fn test_submit_with_empty_form_reports_errors() {
        let state = reduce(DashboardState::new(today()), Action::SubmitStarted);

        assert!(!state.submitting);
        assert_eq!(
            state.errors,
            vec![
                "Descrição é obrigatória",
                "Valor deve ser um número diferente de zero"
            ]
        );
    }

    #[test]
    fn test_editing_clears_errors() {
        let state = reduce(DashboardState::new(today()), Action::SubmitStarted);
        let state = reduce(state, Action::SetDescription("Mercado".to_string()));
        assert!(state.errors.is_empty());
        assert_eq!(state.form.description, "Mercado");
    }

    #[test]
    fn test_submit_is_not_reentrant() {
        let mut state = DashboardState::new(today());
        state.submitting = true;
        state.errors = vec!["kept".to_string()];

        let next = reduce(state.clone(), Action::SubmitStarted);
        assert_eq!(next, state);
    }

    #[test]
    fn test_state_serializes() {
        let state = DashboardState::new(today());
        let json = serde_json::to_string(&state).unwrap();
        let back: DashboardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
