//! Core data models for fintrack
//!
//! This module contains all the data structures that represent the tracking
//! domain: transactions, categories, tags, people and bonus payouts.

pub mod category;
pub mod ids;
pub mod money;
pub mod payout;
pub mod person;
pub mod projection;
pub mod tag;
pub mod transaction;

pub use category::{default_categories, Category, BONUS_CATEGORY, SALARY_CATEGORY};
pub use ids::{CategoryId, PayoutId, PersonId, TagId, TransactionId};
pub use money::Money;
pub use payout::BonusPayout;
pub use person::Person;
pub use projection::MonthlyProjection;
pub use tag::{default_tags, Tag, INSTALLMENT_TAG, RECURRING_TAG, WORK_TAG};
pub use transaction::{Installment, PaymentStatus, Priority, Transaction, TransactionType};
