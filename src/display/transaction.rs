//! Transaction display formatting
//!
//! Formats transactions for terminal output in table and detail views.

use crate::models::{Transaction, TransactionType};

/// Format a list of transactions as a table
pub fn format_transaction_list(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let desc_width = txns
        .iter()
        .map(|t| t.description.chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    let cat_width = txns
        .iter()
        .map(|t| t.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<desc_width$}  {:<cat_width$}  {:>12}  {:<7}  {}\n",
        "ID",
        "Date",
        "Description",
        "Category",
        "Amount",
        "Status",
        "Parcela",
        desc_width = desc_width,
        cat_width = cat_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<desc_width$}  {:-<cat_width$}  {:->12}  {:-<7}  {:-<7}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width,
        cat_width = cat_width,
    ));

    for txn in txns {
        let signed = match txn.kind {
            TransactionType::Income => format!("+{}", txn.amount),
            TransactionType::Expense => format!("-{}", txn.amount),
        };
        let installment = txn
            .installment
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_default();

        output.push_str(&format!(
            "{:<12}  {:<10}  {:<desc_width$}  {:<cat_width$}  {:>12}  {:<7}  {}\n",
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d"),
            txn.description,
            txn.category,
            signed,
            txn.payment_status().to_string(),
            installment,
            desc_width = desc_width,
            cat_width = cat_width,
        ));
    }

    output
}

/// Format a single transaction in detail view
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.description));
    output.push_str(&format!("  ID: {}\n", txn.id));
    output.push_str(&format!("  Type: {}\n", txn.kind));
    output.push_str(&format!("  Amount: {}\n", txn.amount));
    output.push_str(&format!("  Date: {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Category: {}\n", txn.category));
    output.push_str(&format!("  Status: {}\n", txn.payment_status()));

    if !txn.tags.is_empty() {
        output.push_str(&format!("  Tags: {}\n", txn.tags.join(", ")));
    }
    if let Some(priority) = txn.priority {
        output.push_str(&format!("  Priority: {}\n", priority));
    }
    if let Some(installment) = &txn.installment {
        output.push_str(&format!("  Installment: {}\n", installment));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Installment, Money};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        let mut txn = Transaction::new(
            TransactionType::Expense,
            "TV",
            Money::from_cents(30000),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            "Casa",
        );
        txn.installment = Some(Installment { current: 1, total: 3 });
        txn
    }

    #[test]
    fn test_empty_list() {
        assert!(format_transaction_list(&[]).contains("No transactions found."));
    }

    #[test]
    fn test_list_contains_signed_amount_and_installment() {
        let output = format_transaction_list(&[sample()]);
        assert!(output.contains("-300.00"));
        assert!(output.contains("1/3"));
        assert!(output.contains("2025-01-15"));
    }

    #[test]
    fn test_details_include_installment_section() {
        let output = format_transaction_details(&sample());
        assert!(output.contains("Installment: 1/3"));
        assert!(output.contains("Category: Casa"));
    }
}
