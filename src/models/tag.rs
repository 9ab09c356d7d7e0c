//! Tag model
//!
//! Tags are soft references like categories: transactions store tag names,
//! and the generation engine relies on a few well-known tag names to mark
//! generated series.

use serde::{Deserialize, Serialize};

use super::ids::TagId;

/// Tag added to every record generated from a recurring template
pub const RECURRING_TAG: &str = "Recorrente";

/// Tag added to every record generated from an installment template
pub const INSTALLMENT_TAG: &str = "Parcelado";

/// Tag added to generated salary income records
pub const WORK_TAG: &str = "Trabalho";

/// A transaction tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    /// Unique within an owner partition
    pub name: String,
    /// Display color (hex)
    pub color: String,
}

impl Tag {
    /// Create a new tag with a fresh id
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TagId::new(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The fixed default tag set seeded on first run
pub fn default_tags() -> Vec<Tag> {
    [
        ("Urgente", "#ef4444"),
        ("Alta Prioridade", "#f97316"),
        (INSTALLMENT_TAG, "#f59e0b"),
        (RECURRING_TAG, "#3b82f6"),
        ("Mensal", "#06b6d4"),
        ("Pessoal", "#a855f7"),
        (WORK_TAG, "#10b981"),
        ("Família", "#ec4899"),
        ("Casa", "#ef4444"),
        ("Essencial", "#06b6d4"),
        ("Opcional", "#6b7280"),
        ("Planejado", "#22c55e"),
        ("Imprevisto", "#f59e0b"),
        ("13º Salário", "#22c55e"),
        ("Boleto", "#f97316"),
        ("PIX", "#10b981"),
        ("Cartão", "#e11d48"),
    ]
    .into_iter()
    .map(|(name, color)| Tag::new(name, color))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag() {
        let tag = Tag::new("Urgente", "#ef4444");
        assert_eq!(tag.name, "Urgente");
    }

    #[test]
    fn test_defaults_include_series_tags() {
        let defaults = default_tags();
        assert!(defaults.iter().any(|t| t.name == RECURRING_TAG));
        assert!(defaults.iter().any(|t| t.name == INSTALLMENT_TAG));
        assert!(defaults.iter().any(|t| t.name == WORK_TAG));
    }

    #[test]
    fn test_default_names_unique() {
        let defaults = default_tags();
        let mut names: Vec<_> = defaults.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), defaults.len());
    }
}
