//! Bonus payout model ("13º Salário")
//!
//! A lump sum paid out in one or two installments spaced exactly 30 days
//! apart. Creating, updating or deleting a payout triggers (re)generation of
//! its income transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::BONUS_CATEGORY;
use super::ids::PayoutId;
use super::money::Money;

/// A 13th-salary / bonus payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPayout {
    pub id: PayoutId,
    /// Total amount, split evenly across installments
    pub amount: Money,
    /// Date the first installment lands
    pub entry_date: NaiveDate,
    /// Number of installments (1 or 2)
    pub installments: u32,
    /// Optional label; falls back to "13º Salário" in generated descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BonusPayout {
    /// Create a new payout with a fresh id
    pub fn new(amount: Money, entry_date: NaiveDate, installments: u32) -> Self {
        Self {
            id: PayoutId::new(),
            amount,
            entry_date,
            installments,
            description: None,
        }
    }

    /// The label used as the description prefix of generated records
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(BONUS_CATEGORY)
    }

    /// Description of the i-th (zero-based) generated installment record
    pub fn installment_description(&self, index: u32) -> String {
        format!("{} - {}ª parcela", self.label(), index + 1)
    }
}
