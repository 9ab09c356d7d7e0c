//! Input validation for user-supplied records
//!
//! Validators check fields in declaration order and report only the first
//! violation, so callers get one actionable message at a time.

use crate::error::{FinError, FinResult};
use crate::models::{BonusPayout, Money, Person};

/// Validate the user-editable fields of a transaction template.
///
/// The same rules apply on create and on update of the merged record.
pub fn validate_transaction_fields(
    description: &str,
    amount: Money,
    category: &str,
) -> FinResult<()> {
    if description.trim().is_empty() {
        return Err(FinError::Validation("Description is required".to_string()));
    }
    if !amount.is_positive() {
        return Err(FinError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if category.trim().is_empty() {
        return Err(FinError::Validation("Category is required".to_string()));
    }
    Ok(())
}

/// Validate an installment position against its total
pub fn validate_installment(current: u32, total: u32) -> FinResult<()> {
    if total == 0 {
        return Err(FinError::Validation(
            "Installment total must be at least 1".to_string(),
        ));
    }
    if current == 0 || current > total {
        return Err(FinError::Validation(format!(
            "Installment position must be between 1 and {}",
            total
        )));
    }
    Ok(())
}

/// Validate a person record
pub fn validate_person(person: &Person) -> FinResult<()> {
    if person.name.trim().is_empty() {
        return Err(FinError::Validation("Name is required".to_string()));
    }
    if !person.net_salary.is_positive() {
        return Err(FinError::Validation(
            "Net salary must be greater than zero".to_string(),
        ));
    }
    if person.payment_day < 1 || person.payment_day > 31 {
        return Err(FinError::Validation(
            "Payment day must be between 1 and 31".to_string(),
        ));
    }
    if let Some(gross) = person.gross_salary {
        if gross < person.net_salary {
            return Err(FinError::Validation(
                "Gross salary cannot be less than net salary".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate a bonus payout record
pub fn validate_payout(payout: &BonusPayout) -> FinResult<()> {
    if !payout.amount.is_positive() {
        return Err(FinError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if payout.installments < 1 || payout.installments > 2 {
        return Err(FinError::Validation(
            "Installments must be 1 or 2".to_string(),
        ));
    }
    Ok(())
}
