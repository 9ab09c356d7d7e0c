//! Transaction model
//!
//! Represents income and expense records. Every record is fully independent
//! once created: recurrence and installments are generation-time instructions,
//! not persisted relationships. Series membership is reconstructed at
//! reconciliation time by matching description and amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Payment status of an expense; an absent status is equivalent to `Open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Open,
    Paid,
    Overdue,
}

impl PaymentStatus {
    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

/// Expense priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Marks a record as one of a fixed-size installment series
///
/// `current <= total` is expected but not enforced at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub current: u32,
    pub total: u32,
}

impl Installment {
    pub fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// A persisted income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, generated at creation, never reused
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Free-text label; also the matching key for generated series
    pub description: String,

    /// Positive amount; direction comes from `kind`
    pub amount: Money,

    /// Calendar day bucket (no time component)
    pub date: NaiveDate,

    /// Category name (soft reference; renames do not cascade)
    pub category: String,

    /// Tag names (soft references); insertion order preserved for display
    #[serde(default)]
    pub tags: Vec<String>,

    /// Expense priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Payment status; `None` is equivalent to `Open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,

    /// Installment descriptor, if this record is part of a fixed series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Installment>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionType,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            description: description.into(),
            amount,
            date,
            category: category.into(),
            tags: Vec::new(),
            priority: None,
            status: None,
            installment: None,
        }
    }

    /// Check if this is an income record
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense record
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Effective payment status (`None` reads as `Open`)
    pub fn payment_status(&self) -> PaymentStatus {
        self.status.unwrap_or_default()
    }

    /// Check if this record carries an installment descriptor
    pub fn is_installment(&self) -> bool {
        self.installment.is_some()
    }

    /// Check if the record carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.description,
            self.amount
        )
    }
}
