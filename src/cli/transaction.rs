//! Transaction CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{FinError, FinResult};
use crate::models::{Money, PaymentStatus, Priority, TransactionType};
use crate::services::{ExpansionMode, NewTransaction, TransactionPatch, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a transaction; recurring and installment entries expand into
    /// their whole series
    Add {
        /// Transaction type (income, expense)
        #[arg(short = 't', long, default_value = "expense")]
        r#type: String,
        /// Description
        description: String,
        /// Amount (e.g., "300.00" or "300")
        amount: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
        /// Repeat monthly
        #[arg(long, conflicts_with = "installments")]
        recurring: bool,
        /// Months of the recurring series (default 12)
        #[arg(long, requires = "recurring")]
        months: Option<u32>,
        /// Total installments of a plan
        #[arg(long)]
        installments: Option<u32>,
        /// Position of the first recorded installment (default 1)
        #[arg(long, requires = "installments", default_value = "1")]
        current: u32,
    },
    /// List transactions
    List {
        /// Filter by type (income, expense)
        #[arg(short = 't', long)]
        r#type: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or prefix as shown in lists)
        id: String,
    },
    /// Edit a transaction
    #[command(alias = "update")]
    Edit {
        /// Transaction ID
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New comma-separated tags (replaces existing)
        #[arg(long)]
        tags: Option<String>,
        /// New priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// New status (open, paid, overdue)
        #[arg(long)]
        status: Option<String>,
    },
    /// Mark a transaction as paid
    Pay {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

pub(crate) fn parse_amount(s: &str) -> FinResult<Money> {
    Money::parse(s).map_err(|e| {
        FinError::Validation(format!(
            "Invalid amount: '{}'. Use format like '300.00' or '300'. Error: {}",
            s, e
        ))
    })
}

pub(crate) fn parse_date(s: &str) -> FinResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| FinError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s)))
}

pub(crate) fn parse_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_type(s: &str) -> FinResult<TransactionType> {
    TransactionType::parse(s).ok_or_else(|| {
        FinError::Validation(format!(
            "Invalid transaction type: '{}'. Valid types: income, expense",
            s
        ))
    })
}

fn parse_priority(s: &str) -> FinResult<Priority> {
    Priority::parse(s).ok_or_else(|| {
        FinError::Validation(format!(
            "Invalid priority: '{}'. Valid priorities: low, medium, high",
            s
        ))
    })
}

fn parse_status(s: &str) -> FinResult<PaymentStatus> {
    PaymentStatus::parse(s).ok_or_else(|| {
        FinError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: open, paid, overdue",
            s
        ))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            r#type,
            description,
            amount,
            date,
            category,
            tags,
            priority,
            recurring,
            months,
            installments,
            current,
        } => {
            let kind = parse_type(&r#type)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let mut template = NewTransaction::new(kind, description, amount, date, category);
            if let Some(tags) = tags {
                template.tags = parse_tags(&tags);
            }
            if let Some(priority) = priority {
                template.priority = Some(parse_priority(&priority)?);
            }

            let mode = if recurring {
                ExpansionMode::Recurring {
                    months: months.or(Some(settings.recurring_months)),
                }
            } else if let Some(total) = installments {
                ExpansionMode::Installment { current, total }
            } else {
                ExpansionMode::Single
            };

            let batch = service.add(template, mode)?;
            if batch.len() == 1 {
                println!("Added transaction: {}", batch[0].description);
                println!("  ID: {}", batch[0].id);
            } else {
                println!(
                    "Added {} transactions: {} ({} to {})",
                    batch.len(),
                    batch[0].description,
                    batch[0].date.format("%Y-%m-%d"),
                    batch[batch.len() - 1].date.format("%Y-%m-%d"),
                );
            }
        }

        TransactionCommands::List { r#type } => {
            let txns = match r#type {
                Some(t) => service.list_by_type(parse_type(&t)?)?,
                None => service.list()?,
            };
            print!("{}", format_transaction_list(&txns));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            date,
            category,
            tags,
            priority,
            status,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinError::transaction_not_found(&id))?;

            let patch = TransactionPatch {
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category,
                tags: tags.as_deref().map(parse_tags),
                priority: priority.as_deref().map(parse_priority).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(txn.id, patch)?;
            println!("Updated transaction: {}", updated.description);
        }

        TransactionCommands::Pay { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinError::transaction_not_found(&id))?;
            let updated = service.set_status(txn.id, PaymentStatus::Paid)?;
            println!("Marked as paid: {}", updated.description);
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinError::transaction_not_found(&id))?;
            service.delete(txn.id)?;
            println!("Deleted transaction: {}", txn.description);
        }
    }

    Ok(())
}
