//! Tag service
//!
//! Tags are labels only, like categories. The seeded defaults include the
//! series tags the generators attach to transactions.

use crate::error::{FinError, FinResult};
use crate::models::{default_tags, Tag, TagId};
use crate::storage::Storage;

/// Service for tag management
pub struct TagService<'a> {
    storage: &'a Storage,
}

impl<'a> TagService<'a> {
    /// Create a new tag service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Seed the default catalog if the partition has no tags yet
    pub fn ensure_seeded(&self) -> FinResult<()> {
        if self.storage.tags.count()? > 0 {
            return Ok(());
        }
        self.storage.tags.replace_all(default_tags())?;
        self.storage.tags.save()
    }

    /// Add a tag. Adding a name that already exists is a no-op and returns
    /// the existing record.
    pub fn add(&self, name: &str, color: &str) -> FinResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinError::Validation("Tag name is required".to_string()));
        }

        let tag = Tag::new(name, color);
        match self.storage.tags.add(tag.clone()) {
            Ok(()) => {
                self.storage.tags.save()?;
                Ok(tag)
            }
            Err(FinError::Duplicate { .. }) => match self.storage.tags.get_by_name(name)? {
                Some(existing) => Ok(existing),
                None => Err(FinError::tag_not_found(name)),
            },
            Err(e) => Err(e),
        }
    }

    /// Get a tag by ID
    pub fn get(&self, id: TagId) -> FinResult<Tag> {
        self.storage
            .tags
            .get(id)?
            .ok_or_else(|| FinError::tag_not_found(id.to_string()))
    }

    /// Find a tag by exact name or by ID prefix
    pub fn find(&self, reference: &str) -> FinResult<Option<Tag>> {
        if let Some(tag) = self.storage.tags.get_by_name(reference)? {
            return Ok(Some(tag));
        }

        let stripped = reference.strip_prefix("tag-").unwrap_or(reference);
        Ok(self
            .storage
            .tags
            .get_all()?
            .into_iter()
            .find(|t| t.id.as_uuid().to_string().starts_with(stripped)))
    }

    /// List all tags, sorted by name
    pub fn list(&self) -> FinResult<Vec<Tag>> {
        let mut tags = self.storage.tags.get_all()?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    /// Update a tag's display fields. Existing transactions keep the name
    /// they were written with.
    pub fn update(&self, id: TagId, name: Option<&str>, color: Option<&str>) -> FinResult<Tag> {
        let mut tag = self.get(id)?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(FinError::Validation("Tag name is required".to_string()));
            }
            tag.name = name.to_string();
        }
        if let Some(color) = color {
            tag.color = color.to_string();
        }

        self.storage.tags.upsert(tag.clone())?;
        self.storage.tags.save()?;
        Ok(tag)
    }

    /// Delete a tag. No cascade into transactions.
    pub fn delete(&self, id: TagId) -> FinResult<()> {
        if !self.storage.tags.delete(id)? {
            return Err(FinError::tag_not_found(id.to_string()));
        }
        self.storage.tags.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::{INSTALLMENT_TAG, RECURRING_TAG, WORK_TAG};
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "maria").unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_seeded_defaults_cover_series_tags() {
        let (_temp_dir, storage) = test_storage();
        let service = TagService::new(&storage);
        service.ensure_seeded().unwrap();

        let names: Vec<String> = service.list().unwrap().into_iter().map(|t| t.name).collect();
        assert!(names.iter().any(|n| n == RECURRING_TAG));
        assert!(names.iter().any(|n| n == INSTALLMENT_TAG));
        assert!(names.iter().any(|n| n == WORK_TAG));
    }

    #[test]
    fn test_duplicate_add_is_silent() {
        let (_temp_dir, storage) = test_storage();
        let service = TagService::new(&storage);
        service.ensure_seeded().unwrap();

        let before = service.list().unwrap().len();
        let existing = service.add(RECURRING_TAG, "#000000").unwrap();

        assert_eq!(existing.name, RECURRING_TAG);
        assert_eq!(service.list().unwrap().len(), before);
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_temp_dir, storage) = test_storage();
        let service = TagService::new(&storage);

        assert!(service.add("  ", "#000000").unwrap_err().is_validation());
    }
}
