//! Transaction service
//!
//! Adding a transaction expands the template through its expansion mode and
//! appends the whole batch in one save. Updates merge a sparse patch over
//! the stored record and validate the merged result before persisting.

use chrono::NaiveDate;

use crate::error::{FinError, FinResult};
use crate::models::{
    Money, PaymentStatus, Priority, Transaction, TransactionId, TransactionType,
};
use crate::storage::Storage;

use super::generation::{expand_template, ExpansionMode, NewTransaction};
use super::validation::{validate_installment, validate_transaction_fields};

/// Sparse update applied over a stored transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub status: Option<PaymentStatus>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a transaction, expanding it into the records its mode implies.
    ///
    /// Returns the generated batch. The whole batch lands in one save, so
    /// a series is never half persisted.
    pub fn add(
        &self,
        template: NewTransaction,
        mode: ExpansionMode,
    ) -> FinResult<Vec<Transaction>> {
        validate_transaction_fields(&template.description, template.amount, &template.category)?;

        if let ExpansionMode::Installment { current, total } = mode {
            validate_installment(current, total)?;
        }
        if let ExpansionMode::Recurring { months: Some(0) } = mode {
            return Err(FinError::Validation(
                "Recurring months must be at least 1".to_string(),
            ));
        }

        let batch = expand_template(&template, &mode);
        self.storage.transactions.append_batch(batch.clone())?;
        self.storage.transactions.save()?;
        Ok(batch)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinResult<Transaction> {
        self.storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinError::transaction_not_found(id.to_string()))
    }

    /// Find a transaction by ID or unique ID prefix (as shown in lists)
    pub fn find(&self, reference: &str) -> FinResult<Option<Transaction>> {
        if let Ok(id) = reference.parse::<TransactionId>() {
            if let Some(txn) = self.storage.transactions.get(id)? {
                return Ok(Some(txn));
            }
        }

        let stripped = reference.strip_prefix("txn-").unwrap_or(reference);
        let matches: Vec<Transaction> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.id.as_uuid().to_string().starts_with(stripped))
            .collect();

        match matches.len() {
            1 => Ok(matches.into_iter().next()),
            0 => Ok(None),
            _ => Err(FinError::Validation(format!(
                "Ambiguous transaction reference: '{}'",
                reference
            ))),
        }
    }

    /// List all transactions, sorted by date
    pub fn list(&self) -> FinResult<Vec<Transaction>> {
        let mut txns = self.storage.transactions.get_all()?;
        txns.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.description.cmp(&b.description)));
        Ok(txns)
    }

    /// List transactions of one type
    pub fn list_by_type(&self, kind: TransactionType) -> FinResult<Vec<Transaction>> {
        Ok(self.list()?.into_iter().filter(|t| t.kind == kind).collect())
    }

    /// Apply a patch to one stored record.
    ///
    /// The merged record is validated as a whole, so a patch cannot blank
    /// out a required field.
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> FinResult<Transaction> {
        let mut txn = self.get(id)?;

        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(tags) = patch.tags {
            txn.tags = tags;
        }
        if let Some(priority) = patch.priority {
            txn.priority = Some(priority);
        }
        if let Some(status) = patch.status {
            txn.status = Some(status);
        }

        validate_transaction_fields(&txn.description, txn.amount, &txn.category)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        Ok(txn)
    }

    /// Set the payment status of one record
    pub fn set_status(&self, id: TransactionId, status: PaymentStatus) -> FinResult<Transaction> {
        self.update(
            id,
            TransactionPatch {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Delete a transaction by ID
    pub fn delete(&self, id: TransactionId) -> FinResult<()> {
        if !self.storage.transactions.delete(id)? {
            return Err(FinError::transaction_not_found(id.to_string()));
        }
        self.storage.transactions.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::INSTALLMENT_TAG;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "maria").unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_single() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        let batch = service
            .add(
                NewTransaction::new(
                    TransactionType::Expense,
                    "Luz",
                    Money::from_cents(5000),
                    date(2025, 1, 10),
                    "Contas",
                ),
                ExpansionMode::Single,
            )
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_installment_persists_whole_batch() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        service
            .add(
                NewTransaction::new(
                    TransactionType::Expense,
                    "TV",
                    Money::from_cents(30000),
                    date(2025, 1, 15),
                    "Casa",
                ),
                ExpansionMode::Installment { current: 1, total: 3 },
            )
            .unwrap();

        let txns = service.list().unwrap();
        assert_eq!(txns.len(), 3);
        assert!(txns.iter().all(|t| t.has_tag(INSTALLMENT_TAG)));
    }

    #[test]
    fn test_add_rejects_invalid_template() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .add(
                NewTransaction::new(
                    TransactionType::Expense,
                    "",
                    Money::from_cents(5000),
                    date(2025, 1, 10),
                    "Contas",
                ),
                ExpansionMode::Single,
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 0);
    }

    #[test]
    fn test_update_merges_patch() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        let batch = service
            .add(
                NewTransaction::new(
                    TransactionType::Expense,
                    "Luz",
                    Money::from_cents(5000),
                    date(2025, 1, 10),
                    "Contas",
                ),
                ExpansionMode::Single,
            )
            .unwrap();
        let id = batch[0].id;

        let updated = service
            .update(
                id,
                TransactionPatch {
                    amount: Some(Money::from_cents(5500)),
                    status: Some(PaymentStatus::Paid),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount.cents(), 5500);
        assert_eq!(updated.description, "Luz");
        assert_eq!(updated.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_update_rejects_blanked_description() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        let batch = service
            .add(
                NewTransaction::new(
                    TransactionType::Expense,
                    "Luz",
                    Money::from_cents(5000),
                    date(2025, 1, 10),
                    "Contas",
                ),
                ExpansionMode::Single,
            )
            .unwrap();

        let err = service
            .update(
                batch[0].id,
                TransactionPatch {
                    description: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_temp_dir, storage) = test_storage();
        let service = TransactionService::new(&storage);

        let err = service.delete(TransactionId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
