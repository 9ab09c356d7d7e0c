//! Person model
//!
//! A person is a recurring income source: creating or updating one triggers
//! (re)generation of a 12-month window of salary income transactions.

use serde::{Deserialize, Serialize};

use super::ids::PersonId;
use super::money::Money;

/// A salaried person whose income is tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Gross monthly salary, if known; must be >= net when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_salary: Option<Money>,
    /// Net monthly salary; the amount of each generated income record
    pub net_salary: Money,
    /// Expected 13th-salary total for the year
    #[serde(default)]
    pub thirteenth_salary: Money,
    /// Day of the month the salary lands (1-31, clamped to month length)
    pub payment_day: u32,
}

impl Person {
    /// Create a new person with a fresh id
    pub fn new(name: impl Into<String>, net_salary: Money, payment_day: u32) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            gross_salary: None,
            net_salary,
            thirteenth_salary: Money::zero(),
            payment_day,
        }
    }

    /// Description used on every generated salary record for this person
    pub fn salary_description(&self) -> String {
        format!("{} - Salário", self.name)
    }
}
