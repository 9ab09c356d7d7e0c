//! Storage layer for fintrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each owner gets a disjoint partition under `data/<owner>/`.

pub mod categories;
pub mod file_io;
pub mod payouts;
pub mod people;
pub mod tags;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use payouts::PayoutRepository;
pub use people::PersonRepository;
pub use tags::TagRepository;
pub use transactions::TransactionRepository;

use crate::config::paths::FintrackPaths;
use crate::error::FinError;

/// Main storage coordinator that provides access to all repositories
/// of one owner partition
pub struct Storage {
    paths: FintrackPaths,
    owner: String,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub tags: TagRepository,
    pub people: PersonRepository,
    pub payouts: PayoutRepository,
}

impl Storage {
    /// Open the storage partition of one owner
    pub fn open(paths: FintrackPaths, owner: &str) -> Result<Self, FinError> {
        // Ensure directories exist
        paths.ensure_directories(owner)?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file(owner)),
            categories: CategoryRepository::new(paths.categories_file(owner)),
            tags: TagRepository::new(paths.tags_file(owner)),
            people: PersonRepository::new(paths.people_file(owner)),
            payouts: PayoutRepository::new(paths.payouts_file(owner)),
            owner: owner.to_string(),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// Get the owner this partition belongs to
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Load all collections from disk
    pub fn load_all(&self) -> Result<(), FinError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.tags.load()?;
        self.people.load()?;
        self.payouts.load()?;
        Ok(())
    }

    /// Save all collections to disk
    pub fn save_all(&self) -> Result<(), FinError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.tags.save()?;
        self.people.save()?;
        self.payouts.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_open_creates_partition() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "maria").unwrap();

        assert!(temp_dir.path().join("data").join("maria").exists());
        assert_eq!(storage.owner(), "maria");
    }

    #[test]
    fn test_partitions_do_not_share_data() {
        let temp_dir = TempDir::new().unwrap();

        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let maria = Storage::open(paths.clone(), "maria").unwrap();
        maria.load_all().unwrap();
        maria
            .tags
            .add(crate::models::Tag::new("Viagem", "#06b6d4"))
            .unwrap();
        maria.save_all().unwrap();

        let joao = Storage::open(paths, "joao").unwrap();
        joao.load_all().unwrap();
        assert_eq!(joao.tags.count().unwrap(), 0);
    }
}
