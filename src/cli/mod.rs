use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::api::{Client, DEFAULT_API_URL};
use crate::application::view_state::{Action, DashboardState, reduce};
use crate::application::{AppError, LedgerService};
use crate::domain::{
    Cents, FixedExpense, Summary, Transaction, TransactionKind, format_brl, format_currency, format_date,
    format_naive_date, parse_cents,
};

/// Fintelli - Personal finance client
#[derive(Parser)]
#[command(name = "fintelli")]
#[command(about = "Track income, expenses and balance through the Fintelli API")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Fintelli API
    #[arg(long, env = "FINTELLI_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show total income, total expense and balance
    Summary {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List transactions, newest first
    Transactions {
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Add a transaction
    Add {
        /// Transaction type: income or expense
        kind: String,

        /// Amount (e.g., "50.00", "50,00" or "1.234,56"); the sign comes from the type
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Description of the transaction
        description: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: i64,
    },

    /// Compare the server's summary with one recomputed from its transactions
    Check,

    /// Fixed monthly expense commands
    #[command(subcommand)]
    Fixed(FixedCommands),

    /// Export transactions to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Format values the way the dashboard shows them
    #[command(subcommand)]
    Format(FormatCommands),
}

#[derive(Subcommand)]
pub enum FixedCommands {
    /// List fixed expenses and their monthly total
    List,

    /// Add a fixed expense
    Add {
        /// Description (e.g., "Internet")
        description: String,

        /// Monthly amount (e.g., "100.00")
        amount: String,
    },

    /// Delete a fixed expense by id
    Delete {
        /// Fixed expense id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum FormatCommands {
    /// Format a number as Reais (e.g., 1234.5 -> R$ 1.234,50)
    Currency {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Format a date or timestamp as DD/MM/YYYY
    Date { value: String },
}

impl Cli {
    fn service(&self) -> Result<LedgerService<Client>> {
        let client = Client::new(&self.api_url)
            .with_context(|| format!("Invalid API url '{}'", self.api_url))?;
        Ok(LedgerService::new(client))
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Summary { format } => {
                let state = load_dashboard(&self.service()?).await?;
                match format.as_str() {
                    "table" => print!("{}", render_summary(&state.summary)),
                    "json" => println!("{}", serde_json::to_string_pretty(&state.summary)?),
                    other => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", other),
                }
            }

            Commands::Transactions { limit, format } => {
                let state = load_dashboard(&self.service()?).await?;
                let shown = &state.transactions[..limit
                    .unwrap_or(state.transactions.len())
                    .min(state.transactions.len())];
                match format.as_str() {
                    "table" => print!("{}", render_transactions(shown)),
                    "json" => println!("{}", serde_json::to_string_pretty(shown)?),
                    other => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", other),
                }
            }

            Commands::Add {
                kind,
                amount,
                description,
                date,
            } => {
                let kind = TransactionKind::from_str(kind)
                    .with_context(|| format!("Invalid type '{}'. Use income or expense", kind))?;
                run_add_command(
                    &self.service()?,
                    kind,
                    amount.clone(),
                    description.clone(),
                    date.clone(),
                )
                .await?;
            }

            Commands::Delete { id } => {
                self.service()?.delete_transaction(*id).await?;
                println!("Deleted transaction {}", id);
            }

            Commands::Check => {
                let check = self.service()?.check_summary().await?;
                println!("{:<10} {:>18} {:>18}", "", "SERVER", "RECOMPUTED");
                println!("{}", "-".repeat(48));
                for (label, remote, local) in [
                    ("income", check.remote.income, check.local.income),
                    ("expense", check.remote.expense, check.local.expense),
                    ("balance", check.remote.balance, check.local.balance),
                ] {
                    println!(
                        "{:<10} {:>18} {:>18}",
                        label,
                        format_brl(remote),
                        format_brl(local)
                    );
                }
                if check.is_consistent() {
                    println!("\nSummary is consistent.");
                } else {
                    println!("\nSummary differs (the server caches it for up to an hour).");
                }
            }

            Commands::Fixed(cmd) => {
                run_fixed_command(&self.service()?, cmd).await?;
            }

            Commands::Export { output, format } => {
                let service = self.service()?;
                let dashboard = service.dashboard().await?;
                run_export_command(&dashboard.transactions, output.as_deref(), format)?;
            }

            Commands::Format(FormatCommands::Currency { value }) => {
                let number: f64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("'{}' is not a number", value))?;
                println!("{}", format_currency(number)?);
            }

            Commands::Format(FormatCommands::Date { value }) => {
                println!("{}", format_date(value)?);
            }
        }

        Ok(())
    }
}

async fn load_dashboard(service: &LedgerService<Client>) -> Result<DashboardState> {
    let state = reduce(DashboardState::new(today()), Action::LoadStarted);
    match service.list_transactions().await {
        Ok(transactions) => Ok(reduce(state, Action::Loaded(transactions))),
        Err(err) => {
            tracing::error!(%err, "failed to load transactions");
            let state = reduce(state, Action::LoadFailed);
            Err(anyhow::Error::new(err).context(state.errors.join("; ")))
        }
    }
}

async fn run_add_command(
    service: &LedgerService<Client>,
    kind: TransactionKind,
    amount: String,
    description: String,
    date: Option<String>,
) -> Result<()> {
    let today = today();
    let mut state = DashboardState::new(today);
    state.loading = false;

    let mut actions = vec![
        Action::SetKind(kind),
        Action::SetDescription(description),
        Action::SetAmount(amount),
    ];
    if let Some(date) = date {
        actions.push(Action::SetDate(date));
    }
    actions.push(Action::SubmitStarted);
    let state = actions.into_iter().fold(state, reduce);

    if !state.submitting {
        anyhow::bail!("{}", state.errors.join("\n"));
    }

    match service.add_transaction(&state.form.to_candidate()).await {
        Ok(transaction) => {
            let line = render_transaction_line(&transaction);
            let state = reduce(
                state,
                Action::SubmitSucceeded {
                    transaction,
                    today,
                },
            );
            if let Some(notice) = state.notice {
                println!("{}", notice);
            }
            println!("{}", line);
            Ok(())
        }
        Err(AppError::InvalidTransaction(validation)) => {
            let state = reduce(state, Action::SubmitRejected(validation.messages()));
            anyhow::bail!("{}", state.errors.join("\n"))
        }
        Err(AppError::TransactionRejected(detail)) => {
            let state = reduce(state, Action::SubmitRejected(vec![detail]));
            anyhow::bail!("{}", state.errors.join("\n"))
        }
        Err(err) => {
            tracing::error!(%err, "failed to add transaction");
            let state = reduce(state, Action::SubmitFailed);
            Err(anyhow::Error::new(err).context(state.errors.join("; ")))
        }
    }
}

async fn run_fixed_command(service: &LedgerService<Client>, cmd: &FixedCommands) -> Result<()> {
    match cmd {
        FixedCommands::List => {
            let list = service.list_fixed_expenses().await?;
            print!("{}", render_fixed_expenses(&list.expenses, list.total));
        }
        FixedCommands::Add {
            description,
            amount,
        } => {
            let amount_cents =
                parse_cents(amount).context("Invalid amount format. Use '100.00' or '100'")?;
            let expense = service.add_fixed_expense(description, amount_cents).await?;
            println!(
                "Added fixed expense: {} {}{}",
                expense.description,
                format_brl(expense.amount_cents),
                expense.id.map(|id| format!(" ({})", id)).unwrap_or_default()
            );
        }
        FixedCommands::Delete { id } => {
            service.delete_fixed_expense(*id).await?;
            println!("Deleted fixed expense {}", id);
        }
    }
    Ok(())
}

fn run_export_command(
    transactions: &[Transaction],
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(transactions);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format {
        "csv" => exporter.export_transactions_csv(writer)?,
        "json" => exporter.export_transactions_json(writer)?.transactions.len(),
        _ => anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format),
    };
    if output.is_some() {
        eprintln!("Exported {} transactions", count);
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn render_summary(summary: &Summary) -> String {
    format!(
        "{:<20} {:>18}\n{:<20} {:>18}\n{:<20} {:>18}\n",
        "Total de Receitas",
        format_brl(summary.income),
        "Total de Despesas",
        format_brl(summary.expense),
        "Saldo Atual",
        format_brl(summary.balance),
    )
}

fn render_transaction_line(transaction: &Transaction) -> String {
    format!(
        "{:<12} {:<32} {:>16} {:>8}",
        format_naive_date(transaction.transaction_date),
        truncate(&transaction.description, 32),
        format_brl(transaction.amount_cents),
        transaction.id.map(|id| id.to_string()).unwrap_or_default()
    )
}

fn render_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "Nenhuma transação encontrada.\n".to_string();
    }
    let mut out = format!(
        "{:<12} {:<32} {:>16} {:>8}\n{}\n",
        "DATA",
        "DESCRIÇÃO",
        "VALOR",
        "ID",
        "-".repeat(71)
    );
    for transaction in transactions {
        out.push_str(&render_transaction_line(transaction));
        out.push('\n');
    }
    out
}

fn render_fixed_expenses(expenses: &[FixedExpense], total: Cents) -> String {
    if expenses.is_empty() {
        return "Nenhum gasto fixo cadastrado.\n".to_string();
    }
    let mut out = format!(
        "{:<32} {:>16} {:>8}\n{}\n",
        "DESCRIÇÃO",
        "VALOR",
        "ID",
        "-".repeat(58)
    );
    for expense in expenses {
        out.push_str(&format!(
            "{:<32} {:>16} {:>8}\n",
            truncate(&expense.description, 32),
            format_brl(expense.amount_cents),
            expense.id.map(|id| id.to_string()).unwrap_or_default()
        ));
    }
    out.push_str(&format!("{:<32} {:>16}\n", "TOTAL", format_brl(total)));
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
