//! Bonus payout CLI commands

use clap::Subcommand;

use crate::error::{FinError, FinResult};
use crate::models::BonusPayout;
use crate::services::PayoutService;
use crate::storage::Storage;

use super::transaction::{parse_amount, parse_date};

/// Bonus payout subcommands
#[derive(Subcommand)]
pub enum PayoutCommands {
    /// Add a payout and generate its installment records
    Add {
        /// Total amount (e.g., "1000.00")
        amount: String,
        /// Entry date of the first installment (YYYY-MM-DD)
        date: String,
        /// Number of installments
        #[arg(short, long, default_value = "1")]
        installments: u32,
        /// Label used in generated descriptions (default "13º Salário")
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all payouts
    List,
    /// Edit a payout and regenerate its installment records
    #[command(alias = "update")]
    Edit {
        /// Payout ID
        id: String,
        /// New total amount
        #[arg(long)]
        amount: Option<String>,
        /// New entry date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New number of installments
        #[arg(long)]
        installments: Option<u32>,
        /// New label
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a payout and its installment records
    Delete {
        /// Payout ID
        id: String,
    },
}

/// Handle a payout command
pub fn handle_payout_command(storage: &Storage, cmd: PayoutCommands) -> FinResult<()> {
    let service = PayoutService::new(storage);

    match cmd {
        PayoutCommands::Add {
            amount,
            date,
            installments,
            description,
        } => {
            let mut payout =
                BonusPayout::new(parse_amount(&amount)?, parse_date(&date)?, installments);
            payout.description = description;

            let payout = service.add(payout)?;
            println!("Added payout: {}", payout.label());
            println!("  Amount: {}", payout.amount);
            println!("  Installments: {}", payout.installments);
            println!("  ID: {}", payout.id);
        }

        PayoutCommands::List => {
            let payouts = service.list()?;
            if payouts.is_empty() {
                println!("No payouts found.");
            } else {
                for payout in payouts {
                    println!(
                        "{:<12}  {}  {:>12}  {:>2}x  {}",
                        payout.id.to_string(),
                        payout.entry_date.format("%Y-%m-%d"),
                        payout.amount.to_string(),
                        payout.installments,
                        payout.label()
                    );
                }
            }
        }

        PayoutCommands::Edit {
            id,
            amount,
            date,
            installments,
            description,
        } => {
            let found = service
                .find(&id)?
                .ok_or_else(|| FinError::payout_not_found(&id))?;

            if amount.is_none() && date.is_none() && installments.is_none() && description.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let updated = service.update(found.id, amount, date, installments, description)?;
            println!("Updated payout: {}", updated.label());
            println!("Regenerated installment records.");
        }

        PayoutCommands::Delete { id } => {
            let found = service
                .find(&id)?
                .ok_or_else(|| FinError::payout_not_found(&id))?;
            service.delete(found.id)?;
            println!("Deleted payout: {} (installment records removed)", found.label());
        }
    }

    Ok(())
}
