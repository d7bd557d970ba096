use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{
    FixedExpense, FixedExpenseId, NewTransaction, Summary, Transaction, TransactionId,
};

use super::TransactionApi;
use super::wire::{AdapterError, ApiFixedExpense, ApiSummary, ApiTransaction, WireTransaction};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    #[error("resource not found")]
    NotFound,

    #[error("rejected by the server: {0}")]
    Validation(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected payload: {0}")]
    Payload(#[from] AdapterError),
}

/// FastAPI error body. `detail` is a string for handler errors and a list of
/// field errors for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// HTTP client for the Fintelli backend.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    /// A trailing slash is added when missing so routes join below it.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|err| ClientError::InvalidUrl(format!("{base}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base));
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(format!("{path}: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "GET");
        let res = self.http.get(endpoint).send().await?;
        Ok(check_status(res).await?.json::<T>().await?)
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "POST");
        let res = self.http.post(endpoint).json(body).send().await?;
        Ok(check_status(res).await?.json::<T>().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "DELETE");
        let res = self.http.delete(endpoint).send().await?;
        check_status(res).await?;
        Ok(())
    }
}

async fn check_status(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .json::<ErrorResponse>()
        .await
        .map(|err| detail_message(err.detail))
        .unwrap_or_else(|_| "unknown error".to_string());
    tracing::warn!(status = status.as_u16(), %message, "request failed");

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

/// Flatten a FastAPI `detail` into one line. Request validation errors are a
/// list of `{loc, msg, type}` objects; their `msg`s are joined.
fn detail_message(detail: serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(detail) => detail,
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| {
                if let Some(msg) = item.get("msg").and_then(|msg| msg.as_str()) {
                    return msg.to_string();
                }
                match item {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

impl TransactionApi for Client {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        let wire: Vec<WireTransaction> = self.get_json("transactions").await?;
        let transactions = wire
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = transactions.len(), "fetched transactions");
        Ok(transactions)
    }

    async fn fetch_summary(&self) -> Result<Summary, ClientError> {
        let summary: ApiSummary = self.get_json("summary").await?;
        Ok(summary.try_into()?)
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ClientError> {
        let created: WireTransaction = self
            .post_json("transactions", &ApiTransaction::from(transaction))
            .await?;
        Ok(created.try_into()?)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), ClientError> {
        self.delete(&format!("transactions/{id}")).await
    }

    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>, ClientError> {
        let wire: Vec<ApiFixedExpense> = self.get_json("fixed-expenses").await?;
        Ok(wire
            .into_iter()
            .map(FixedExpense::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create_fixed_expense(
        &self,
        expense: &FixedExpense,
    ) -> Result<FixedExpense, ClientError> {
        let created: ApiFixedExpense = self
            .post_json("fixed-expenses", &ApiFixedExpense::from(expense))
            .await?;
        Ok(created.try_into()?)
    }

    async fn delete_fixed_expense(&self, id: FixedExpenseId) -> Result<(), ClientError> {
        self.delete(&format!("fixed-expenses/{id}")).await
    }
}
