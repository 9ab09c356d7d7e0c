//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod payout;
pub mod person;
pub mod report;
pub mod tag;
pub mod transaction;
pub mod user;

pub use category::{handle_category_command, CategoryCommands};
pub use payout::{handle_payout_command, PayoutCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{handle_report_command, ReportCommands};
pub use tag::{handle_tag_command, TagCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use user::{
    handle_login, handle_logout, handle_user_command, handle_whoami, UserCommands,
};
