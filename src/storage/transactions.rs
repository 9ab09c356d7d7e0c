//! Transaction repository for JSON storage
//!
//! Manages loading and saving the whole transaction collection of one owner
//! partition. Every mutating caller follows read-collection, compute,
//! write-collection; `save` persists the full collection in one atomic write.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), FinError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.transactions;
        Ok(())
    }

    /// Save the whole collection to disk in one atomic write
    pub fn save(&self) -> Result<(), FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions = data.clone();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.description.cmp(&b.description)));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    /// Get the full collection
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Replace the full collection (whole-collection overwrite)
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = transactions;
        Ok(())
    }

    /// Append a generated batch to the collection
    pub fn append_batch(&self, batch: Vec<Transaction>) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.extend(batch);
        Ok(())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(existing) = data.iter_mut().find(|t| t.id == txn.id) {
            *existing = txn;
        } else {
            data.push(txn);
        }
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|t| t.id != id);
        Ok(data.len() != before)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
