//! Monthly projection rows produced by the aggregation layer

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Income, expenses and balance of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
}

impl MonthlyProjection {
    /// "2025-01"-style label for display and sorting
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
