//! Person repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinError;
use crate::models::{Person, PersonId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable person collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PersonData {
    people: Vec<Person>,
}

/// Repository for person persistence
pub struct PersonRepository {
    path: PathBuf,
    data: RwLock<Vec<Person>>,
}

impl PersonRepository {
    /// Create a new person repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load people from disk
    pub fn load(&self) -> Result<(), FinError> {
        let file_data: PersonData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.people;
        Ok(())
    }

    /// Save the whole collection to disk, sorted by name
    pub fn save(&self) -> Result<(), FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut people = data.clone();
        people.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = PersonData { people };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a person by ID
    pub fn get(&self, id: PersonId) -> Result<Option<Person>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|p| p.id == id).cloned())
    }

    /// Get a person by exact name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Person>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|p| p.name == name).cloned())
    }

    /// Get the full collection
    pub fn get_all(&self) -> Result<Vec<Person>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Insert or update a person
    pub fn upsert(&self, person: Person) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(existing) = data.iter_mut().find(|p| p.id == person.id) {
            *existing = person;
        } else {
            data.push(person);
        }
        Ok(())
    }

    /// Delete a person, returning whether they existed
    pub fn delete(&self, id: PersonId) -> Result<bool, FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|p| p.id != id);
        Ok(data.len() != before)
    }

    /// Count people
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
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PersonRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("people.json");
        let repo = PersonRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Person::new("Ana", Money::from_cents(350000), 5)).unwrap();

        let found = repo.get_by_name("Ana").unwrap().unwrap();
        assert_eq!(found.payment_day, 5);
        assert!(repo.get_by_name("Bruno").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let person = Person::new("Ana", Money::from_cents(350000), 5);
        let id = person.id;
        repo.upsert(person).unwrap();
        repo.save().unwrap();

        let repo2 = PersonRepository::new(temp_dir.path().join("people.json"));
        repo2.load().unwrap();

        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.net_salary.cents(), 350000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let person = Person::new("Ana", Money::from_cents(350000), 5);
        let id = person.id;
        repo.upsert(person).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }
}
