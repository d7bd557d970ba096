use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::api::wire::ApiTransaction;
use crate::domain::{Summary, Transaction, compute_summary, format_cents};

/// JSON export: the transactions in the backend's wire shape plus the
/// summary computed from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub summary: Summary,
    pub transactions: Vec<ApiTransaction>,
}

/// Exporter for writing a transaction list in various formats.
pub struct Exporter<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Exporter<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Export transactions to CSV format
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "transaction_date", "description", "amount", "kind"])?;

        let mut count = 0;
        for transaction in self.transactions {
            csv_writer.write_record([
                transaction.id.map(|id| id.to_string()).unwrap_or_default(),
                transaction.transaction_date.format("%Y-%m-%d").to_string(),
                transaction.description.clone(),
                format_cents(transaction.amount_cents),
                transaction
                    .kind()
                    .map(|kind| kind.as_str().to_string())
                    .unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export transactions and their summary as a JSON snapshot
    pub fn export_transactions_json<W: Write>(&self, mut writer: W) -> Result<TransactionSnapshot> {
        let snapshot = TransactionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            summary: compute_summary(self.transactions),
            transactions: self.transactions.iter().map(ApiTransaction::from).collect(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
