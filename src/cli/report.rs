//! Report CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_breakdown, format_projections, format_summary};
use crate::error::{FinError, FinResult};
use crate::models::{Transaction, TransactionType};
use crate::services::{
    balance, filter_by_period, monthly_projections, total, totals_by_category, totals_by_tag,
    PeriodFilter,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and balance
    Summary {
        /// Limit to a period (7days, 30days, month)
        #[arg(short, long)]
        period: Option<String>,
        /// Shift the period anchor by whole months (e.g., -1 for last month)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        month_offset: i32,
        /// Count expenses already marked paid
        #[arg(long)]
        include_paid: bool,
    },
    /// Month-by-month income, expenses and balance
    Monthly,
    /// Totals per category
    Categories {
        /// Limit to a period (7days, 30days, month)
        #[arg(short, long)]
        period: Option<String>,
        /// Shift the period anchor by whole months
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        month_offset: i32,
    },
    /// Totals per tag
    Tags {
        /// Limit to a period (7days, 30days, month)
        #[arg(short, long)]
        period: Option<String>,
        /// Shift the period anchor by whole months
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        month_offset: i32,
    },
}

fn parse_period(s: &str) -> FinResult<PeriodFilter> {
    match s.to_lowercase().as_str() {
        "7days" | "week" => Ok(PeriodFilter::SevenDays),
        "30days" => Ok(PeriodFilter::ThirtyDays),
        "month" => Ok(PeriodFilter::Month),
        _ => Err(FinError::Validation(format!(
            "Invalid period: '{}'. Valid periods: 7days, 30days, month",
            s
        ))),
    }
}

fn apply_period(
    txns: Vec<Transaction>,
    period: Option<String>,
    month_offset: i32,
) -> FinResult<Vec<Transaction>> {
    match period {
        Some(p) => {
            let period = parse_period(&p)?;
            Ok(filter_by_period(&txns, period, month_offset, Local::now().date_naive()))
        }
        None => Ok(txns),
    }
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinResult<()> {
    let txns = storage.transactions.get_all()?;
    let symbol = &settings.currency_symbol;

    match cmd {
        ReportCommands::Summary {
            period,
            month_offset,
            include_paid,
        } => {
            let txns = apply_period(txns, period, month_offset)?;
            let income = total(&txns, TransactionType::Income, true);
            let expenses = total(&txns, TransactionType::Expense, include_paid);
            print!("{}", format_summary(income, expenses, balance(&txns), symbol));
        }

        ReportCommands::Monthly => {
            let projections = monthly_projections(&txns, Local::now().date_naive());
            print!("{}", format_projections(&projections, symbol));
        }

        ReportCommands::Categories {
            period,
            month_offset,
        } => {
            let txns = apply_period(txns, period, month_offset)?;
            print!(
                "{}",
                format_breakdown("Category", &totals_by_category(&txns), symbol)
            );
        }

        ReportCommands::Tags {
            period,
            month_offset,
        } => {
            let txns = apply_period(txns, period, month_offset)?;
            print!("{}", format_breakdown("Tag", &totals_by_tag(&txns), symbol));
        }
    }

    Ok(())
}
