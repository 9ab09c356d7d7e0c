//! Category repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.categories;
        Ok(())
    }

    /// Save the whole collection to disk, sorted by name
    pub fn save(&self) -> Result<(), FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories = data.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = CategoryData { categories };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|c| c.id == id).cloned())
    }

    /// Get a category by exact name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|c| c.name == name).cloned())
    }

    /// Get the full collection
    pub fn get_all(&self) -> Result<Vec<Category>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Replace the full collection
    pub fn replace_all(&self, categories: Vec<Category>) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = categories;
        Ok(())
    }

    /// Add a category, rejecting a name collision
    pub fn add(&self, category: Category) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.iter().any(|c| c.name == category.name) {
            return Err(FinError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }
        data.push(category);
        Ok(())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(existing) = data.iter_mut().find(|c| c.id == category.id) {
            *existing = category;
        } else {
            data.push(category);
        }
        Ok(())
    }

    /// Delete a category, returning whether it existed
    pub fn delete(&self, id: CategoryId) -> Result<bool, FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|c| c.id != id);
        Ok(data.len() != before)
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_add_and_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category = Category::new("Mercado", "#22c55e", "shopping-cart", TransactionType::Expense);
        repo.add(category).unwrap();

        let found = repo.get_by_name("Mercado").unwrap().unwrap();
        assert_eq!(found.name, "Mercado");
        assert!(repo.get_by_name("Lazer").unwrap().is_none());
    }

    #[test]
    fn test_add_duplicate_name_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(Category::new("Mercado", "#22c55e", "shopping-cart", TransactionType::Expense))
            .unwrap();
        let err = repo
            .add(Category::new("Mercado", "#ef4444", "basket", TransactionType::Expense))
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_reload_sorted() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(Category::new("Transporte", "#3b82f6", "car", TransactionType::Expense))
            .unwrap();
        repo.add(Category::new("Lazer", "#a855f7", "gamepad", TransactionType::Expense))
            .unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();

        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Lazer");
        assert_eq!(all[1].name, "Transporte");
    }
}
