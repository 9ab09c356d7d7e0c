//! Bonus payout repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinError;
use crate::models::{BonusPayout, PayoutId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable payout collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PayoutData {
    payouts: Vec<BonusPayout>,
}

/// Repository for bonus payout persistence
pub struct PayoutRepository {
    path: PathBuf,
    data: RwLock<Vec<BonusPayout>>,
}

impl PayoutRepository {
    /// Create a new payout repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load payouts from disk
    pub fn load(&self) -> Result<(), FinError> {
        let file_data: PayoutData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.payouts;
        Ok(())
    }

    /// Save the whole collection to disk, sorted by entry date
    pub fn save(&self) -> Result<(), FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payouts = data.clone();
        payouts.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));

        let file_data = PayoutData { payouts };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a payout by ID
    pub fn get(&self, id: PayoutId) -> Result<Option<BonusPayout>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|p| p.id == id).cloned())
    }

    /// Get the full collection
    pub fn get_all(&self) -> Result<Vec<BonusPayout>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Insert or update a payout
    pub fn upsert(&self, payout: BonusPayout) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(existing) = data.iter_mut().find(|p| p.id == payout.id) {
            *existing = payout;
        } else {
            data.push(payout);
        }
        Ok(())
    }

    /// Delete a payout, returning whether it existed
    pub fn delete(&self, id: PayoutId) -> Result<bool, FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|p| p.id != id);
        Ok(data.len() != before)
    }

    /// Count payouts
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
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PayoutRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("payouts.json");
        let repo = PayoutRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let payout = BonusPayout::new(
            Money::from_cents(100000),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            2,
        );
        let id = payout.id;
        repo.upsert(payout).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.installments, 2);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let payout = BonusPayout::new(
            Money::from_cents(100000),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            2,
        );
        repo.upsert(payout).unwrap();
        repo.save().unwrap();

        let repo2 = PayoutRepository::new(temp_dir.path().join("payouts.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
    }
}
