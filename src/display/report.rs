//! Report display formatting

use crate::models::{Money, MonthlyProjection};

/// Format the income/expense/balance summary block
pub fn format_summary(income: Money, expenses: Money, balance: Money, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<10}  {:>14}\n", "Income", income.format_with_symbol(symbol)));
    output.push_str(&format!("{:<10}  {:>14}\n", "Expenses", expenses.format_with_symbol(symbol)));
    output.push_str(&format!("{:-<10}  {:->14}\n", "", ""));
    output.push_str(&format!("{:<10}  {:>14}\n", "Balance", balance.format_with_symbol(symbol)));
    output
}

/// Format monthly projections as a table
pub fn format_projections(projections: &[MonthlyProjection], symbol: &str) -> String {
    if projections.is_empty() {
        return "No months to project.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:>14}  {:>14}  {:>14}\n",
        "Month", "Income", "Expenses", "Balance"
    ));
    output.push_str(&format!("{:-<8}  {:->14}  {:->14}  {:->14}\n", "", "", "", ""));

    for p in projections {
        output.push_str(&format!(
            "{:<8}  {:>14}  {:>14}  {:>14}\n",
            p.label(),
            p.income.format_with_symbol(symbol),
            p.expenses.format_with_symbol(symbol),
            p.balance.format_with_symbol(symbol),
        ));
    }

    output
}

/// Format per-bucket totals (categories or tags) as a table
pub fn format_breakdown(title: &str, buckets: &[(String, Money)], symbol: &str) -> String {
    if buckets.is_empty() {
        return format!("No {} totals to show.\n", title.to_lowercase());
    }

    let name_width = buckets
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(8)
        .max(title.chars().count());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}\n",
        title,
        "Total",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}\n",
        "",
        "",
        name_width = name_width
    ));

    for (name, amount) in buckets {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}\n",
            name,
            amount.format_with_symbol(symbol),
            name_width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_block() {
        let output = format_summary(
            Money::from_cents(100000),
            Money::from_cents(30000),
            Money::from_cents(70000),
            "R$",
        );
        assert!(output.contains("R$1000.00"));
        assert!(output.contains("Balance"));
    }

    #[test]
    fn test_projection_table() {
        let projections = vec![MonthlyProjection {
            year: 2025,
            month: 3,
            income: Money::from_cents(100000),
            expenses: Money::from_cents(25000),
            balance: Money::from_cents(75000),
        }];
        let output = format_projections(&projections, "R$");
        assert!(output.contains("2025-03"));
        assert!(output.contains("R$750.00"));
    }

    #[test]
    fn test_breakdown_table() {
        let buckets = vec![("Casa".to_string(), Money::from_cents(30000))];
        let output = format_breakdown("Category", &buckets, "R$");
        assert!(output.contains("Casa"));
        assert!(output.contains("R$300.00"));
    }
}
