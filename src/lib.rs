//! fintrack - personal finance tracking from the command line
//!
//! Tracks income and expenses for one or more owners, each in their own
//! data partition. Recurring entries, installment plans, salaries and
//! bonus payouts expand into concrete transaction records at entry time,
//! and a reconciliation pass repairs the generated series on load.

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinError, FinResult};
