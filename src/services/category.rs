//! Category service
//!
//! Categories are labels only; renaming or deleting one never touches the
//! transactions that reference it. The seeded defaults include the
//! categories the generators write, so generated records always resolve.

use crate::error::{FinError, FinResult};
use crate::models::{default_categories, Category, CategoryId, TransactionType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Seed the default catalog if the partition has no categories yet
    pub fn ensure_seeded(&self) -> FinResult<()> {
        if self.storage.categories.count()? > 0 {
            return Ok(());
        }
        self.storage.categories.replace_all(default_categories())?;
        self.storage.categories.save()
    }

    /// Add a category. Adding a name that already exists is a no-op and
    /// returns the existing record.
    pub fn add(
        &self,
        name: &str,
        color: &str,
        icon: &str,
        kind: TransactionType,
    ) -> FinResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinError::Validation("Category name is required".to_string()));
        }

        let category = Category::new(name, color, icon, kind);
        match self.storage.categories.add(category.clone()) {
            Ok(()) => {
                self.storage.categories.save()?;
                Ok(category)
            }
            Err(FinError::Duplicate { .. }) => match self.storage.categories.get_by_name(name)? {
                Some(existing) => Ok(existing),
                None => Err(FinError::category_not_found(name)),
            },
            Err(e) => Err(e),
        }
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> FinResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| FinError::category_not_found(id.to_string()))
    }

    /// Get a category by exact name
    pub fn get_by_name(&self, name: &str) -> FinResult<Option<Category>> {
        self.storage.categories.get_by_name(name)
    }

    /// Find a category by exact name or by ID prefix
    pub fn find(&self, reference: &str) -> FinResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(reference)? {
            return Ok(Some(category));
        }

        let stripped = reference.strip_prefix("cat-").unwrap_or(reference);
        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.as_uuid().to_string().starts_with(stripped)))
    }

    /// List all categories, sorted by name
    pub fn list(&self) -> FinResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Update a category's display fields. Existing transactions keep the
    /// name they were written with.
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> FinResult<Category> {
        let mut category = self.get(id)?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(FinError::Validation("Category name is required".to_string()));
            }
            category.name = name.to_string();
        }
        if let Some(color) = color {
            category.color = color.to_string();
        }
        if let Some(icon) = icon {
            category.icon = icon.to_string();
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        Ok(category)
    }

    /// Delete a category. No cascade: transactions referencing it are left
    /// untouched.
    pub fn delete(&self, id: CategoryId) -> FinResult<()> {
        if !self.storage.categories.delete(id)? {
            return Err(FinError::category_not_found(id.to_string()));
        }
        self.storage.categories.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::SALARY_CATEGORY;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "maria").unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_seed_once() {
        let (_temp_dir, storage) = test_storage();
        let service = CategoryService::new(&storage);

        service.ensure_seeded().unwrap();
        let seeded = service.list().unwrap().len();
        assert!(seeded > 0);

        // Second call must not duplicate
        service.ensure_seeded().unwrap();
        assert_eq!(service.list().unwrap().len(), seeded);
    }

    #[test]
    fn test_seeded_defaults_cover_generator_categories() {
        let (_temp_dir, storage) = test_storage();
        let service = CategoryService::new(&storage);
        service.ensure_seeded().unwrap();

        assert!(service.get_by_name(SALARY_CATEGORY).unwrap().is_some());
        assert!(service.get_by_name("13º Salário").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_add_is_silent() {
        let (_temp_dir, storage) = test_storage();
        let service = CategoryService::new(&storage);
        service.ensure_seeded().unwrap();

        let before = service.list().unwrap().len();
        let existing = service
            .add(SALARY_CATEGORY, "#22c55e", "banknote", TransactionType::Income)
            .unwrap();

        assert_eq!(existing.name, SALARY_CATEGORY);
        assert_eq!(service.list().unwrap().len(), before);
    }

    #[test]
    fn test_delete_leaves_transactions_alone() {
        let (_temp_dir, storage) = test_storage();
        let service = CategoryService::new(&storage);

        let created = service
            .add("Mercado", "#22c55e", "shopping-cart", TransactionType::Expense)
            .unwrap();

        use crate::models::{Money, Transaction, TransactionType};
        let txn = Transaction::new(
            TransactionType::Expense,
            "Feira",
            Money::from_cents(12000),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            "Mercado",
        );
        storage.transactions.upsert(txn).unwrap();

        service.delete(created.id).unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns[0].category, "Mercado");
    }
}
