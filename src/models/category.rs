//! Category model
//!
//! Categories are referenced from transactions by name (soft reference):
//! renaming or deleting a category does not cascade to transactions.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Name of the category that salary income records are generated under
pub const SALARY_CATEGORY: &str = "Salário";

/// Name of the category that bonus payout records are generated under
pub const BONUS_CATEGORY: &str = "13º Salário";

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Unique within an owner partition
    pub name: String,
    /// Display color (hex)
    pub color: String,
    /// Display icon (emoji)
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Category {
    /// Create a new category with a fresh id
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            kind,
        }
    }
}

/// The fixed default category set seeded on first run
pub fn default_categories() -> Vec<Category> {
    use TransactionType::{Expense, Income};

    [
        // Income
        (SALARY_CATEGORY, "#10b981", "💰", Income),
        (BONUS_CATEGORY, "#22c55e", "🎁", Income),
        ("Freelance", "#3b82f6", "💼", Income),
        ("Investimentos", "#8b5cf6", "📈", Income),
        ("Vendas", "#f59e0b", "🛒", Income),
        ("Reembolso", "#06b6d4", "↩️", Income),
        ("Outros Recebimentos", "#6b7280", "💵", Income),
        // Expenses
        ("Moradia", "#ef4444", "🏠", Expense),
        ("Aluguel", "#dc2626", "🏘️", Expense),
        ("Alimentação", "#f59e0b", "🍔", Expense),
        ("Supermercado", "#d97706", "🛒", Expense),
        ("Transporte", "#06b6d4", "🚗", Expense),
        ("Combustível", "#0891b2", "⛽", Expense),
        ("Contas", "#f97316", "💡", Expense),
        ("Internet", "#7c2d12", "🌐", Expense),
        ("Telefone", "#dc2626", "📱", Expense),
        ("Saúde", "#ec4899", "🏥", Expense),
        ("Farmácia", "#be185d", "💊", Expense),
        ("Educação", "#6366f1", "📚", Expense),
        ("Lazer", "#14b8a6", "🎮", Expense),
        ("Empréstimos", "#dc2626", "💳", Expense),
        ("Cartão de Crédito", "#e11d48", "💳", Expense),
        ("Vestuário", "#a855f7", "👕", Expense),
        ("Impostos", "#2563eb", "📄", Expense),
        ("Outros", "#6b7280", "📦", Expense),
    ]
    .into_iter()
    .map(|(name, color, icon, kind)| Category::new(name, color, icon, kind))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let cat = Category::new("Moradia", "#ef4444", "🏠", TransactionType::Expense);
        assert_eq!(cat.name, "Moradia");
        assert_eq!(cat.kind, TransactionType::Expense);
    }

    #[test]
    fn test_defaults_include_generator_categories() {
        let defaults = default_categories();
        assert!(defaults.iter().any(|c| c.name == SALARY_CATEGORY));
        assert!(defaults.iter().any(|c| c.name == BONUS_CATEGORY));
    }

    #[test]
    fn test_default_names_unique() {
        let defaults = default_categories();
        let mut names: Vec<_> = defaults.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), defaults.len());
    }

    #[test]
    fn test_serialization_type_field() {
        let cat = Category::new("Salário", "#10b981", "💰", TransactionType::Income);
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["type"], "income");
    }
}
