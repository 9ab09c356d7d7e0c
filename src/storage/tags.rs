//! Tag repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinError;
use crate::models::{Tag, TagId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable tag collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TagData {
    tags: Vec<Tag>,
}

/// Repository for tag persistence
pub struct TagRepository {
    path: PathBuf,
    data: RwLock<Vec<Tag>>,
}

impl TagRepository {
    /// Create a new tag repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load tags from disk
    pub fn load(&self) -> Result<(), FinError> {
        let file_data: TagData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.tags;
        Ok(())
    }

    /// Save the whole collection to disk, sorted by name
    pub fn save(&self) -> Result<(), FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut tags = data.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = TagData { tags };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a tag by ID
    pub fn get(&self, id: TagId) -> Result<Option<Tag>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    /// Get a tag by exact name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.name == name).cloned())
    }

    /// Get the full collection
    pub fn get_all(&self) -> Result<Vec<Tag>, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Replace the full collection
    pub fn replace_all(&self, tags: Vec<Tag>) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = tags;
        Ok(())
    }

    /// Add a tag, rejecting a name collision
    pub fn add(&self, tag: Tag) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.iter().any(|t| t.name == tag.name) {
            return Err(FinError::Duplicate {
                entity_type: "Tag",
                identifier: tag.name,
            });
        }
        data.push(tag);
        Ok(())
    }

    /// Insert or update a tag
    pub fn upsert(&self, tag: Tag) -> Result<(), FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(existing) = data.iter_mut().find(|t| t.id == tag.id) {
            *existing = tag;
        } else {
            data.push(tag);
        }
        Ok(())
    }

    /// Delete a tag, returning whether it existed
    pub fn delete(&self, id: TagId) -> Result<bool, FinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|t| t.id != id);
        Ok(data.len() != before)
    }

    /// Count tags
    pub fn count(&self) -> Result<usize, FinError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
