//! Bonus payout service
//!
//! A payout splits a bonus into installment records spaced thirty days
//! apart. Regeneration removes old records by substring containment on the
//! description within the bonus category, preserving the loose matching
//! users rely on when they have edited descriptions by hand.

use crate::error::{FinError, FinResult};
use crate::models::{BonusPayout, Money, PayoutId, Transaction, BONUS_CATEGORY};
use crate::storage::Storage;

use super::generation::payout_series;
use super::validation::validate_payout;

/// Service for bonus payout management
pub struct PayoutService<'a> {
    storage: &'a Storage,
}

impl<'a> PayoutService<'a> {
    /// Create a new payout service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// A record belongs to a payout when it sits in the bonus category and
    /// its description contains the payout label or the generated
    /// installment prefix.
    fn is_payout_record_for(txn: &Transaction, label: &str) -> bool {
        txn.is_income()
            && txn.category == BONUS_CATEGORY
            && (txn.description.contains(label)
                || txn.description.contains(&format!("{} - ", BONUS_CATEGORY)))
    }

    fn remove_payout_records(&self, label: &str) -> FinResult<usize> {
        let txns = self.storage.transactions.get_all()?;
        let before = txns.len();
        let kept: Vec<Transaction> = txns
            .into_iter()
            .filter(|t| !Self::is_payout_record_for(t, label))
            .collect();
        let removed = before - kept.len();
        self.storage.transactions.replace_all(kept)?;
        Ok(removed)
    }

    /// Add a payout and generate its installment records
    pub fn add(&self, payout: BonusPayout) -> FinResult<BonusPayout> {
        validate_payout(&payout)?;

        self.storage.payouts.upsert(payout.clone())?;
        self.storage
            .transactions
            .append_batch(payout_series(&payout))?;

        self.storage.payouts.save()?;
        self.storage.transactions.save()?;
        Ok(payout)
    }

    /// Get a payout by ID
    pub fn get(&self, id: PayoutId) -> FinResult<BonusPayout> {
        self.storage
            .payouts
            .get(id)?
            .ok_or_else(|| FinError::payout_not_found(id.to_string()))
    }

    /// Find a payout by ID prefix
    pub fn find(&self, reference: &str) -> FinResult<Option<BonusPayout>> {
        let stripped = reference.strip_prefix("pay-").unwrap_or(reference);
        Ok(self
            .storage
            .payouts
            .get_all()?
            .into_iter()
            .find(|p| p.id.as_uuid().to_string().starts_with(stripped)))
    }

    /// List all payouts, sorted by entry date
    pub fn list(&self) -> FinResult<Vec<BonusPayout>> {
        let mut payouts = self.storage.payouts.get_all()?;
        payouts.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));
        Ok(payouts)
    }

    /// Update a payout and regenerate its installment records.
    ///
    /// Records matching the old label are removed first.
    pub fn update(
        &self,
        id: PayoutId,
        amount: Option<Money>,
        entry_date: Option<chrono::NaiveDate>,
        installments: Option<u32>,
        description: Option<String>,
    ) -> FinResult<BonusPayout> {
        let mut payout = self.get(id)?;
        let old_label = payout.label().to_string();

        if let Some(amount) = amount {
            payout.amount = amount;
        }
        if let Some(entry_date) = entry_date {
            payout.entry_date = entry_date;
        }
        if let Some(installments) = installments {
            payout.installments = installments;
        }
        if let Some(description) = description {
            payout.description = Some(description);
        }
        validate_payout(&payout)?;

        self.remove_payout_records(&old_label)?;
        self.storage.payouts.upsert(payout.clone())?;
        self.storage
            .transactions
            .append_batch(payout_series(&payout))?;

        self.storage.payouts.save()?;
        self.storage.transactions.save()?;
        Ok(payout)
    }

    /// Delete a payout and its installment records
    pub fn delete(&self, id: PayoutId) -> FinResult<()> {
        let payout = self.get(id)?;

        self.remove_payout_records(payout.label())?;
        self.storage.payouts.delete(id)?;

        self.storage.payouts.save()?;
        self.storage.transactions.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use chrono::NaiveDate;
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
    fn test_add_generates_installments() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2))
            .unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount.cents() + txns[1].amount.cents(), 100000);
    }

    #[test]
    fn test_update_regenerates_records() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        let payout = service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2))
            .unwrap();

        service
            .update(payout.id, None, None, Some(1), None)
            .unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount.cents(), 100000);
    }

    #[test]
    fn test_update_rejects_out_of_range_installments() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        let payout = service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2))
            .unwrap();

        let err = service
            .update(payout.id, None, None, Some(4), None)
            .unwrap_err();
        assert!(err.is_validation());

        // Failed update must not touch the generated records
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_delete_removes_only_bonus_category_records() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        let payout = service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2))
            .unwrap();

        use crate::models::{Transaction, TransactionType};
        // Same wording but a different category must survive
        storage
            .transactions
            .upsert(Transaction::new(
                TransactionType::Income,
                "13º Salário - adiantamento",
                Money::from_cents(5000),
                date(2025, 6, 2),
                "Outros",
            ))
            .unwrap();

        service.delete(payout.id).unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category, "Outros");
    }

    #[test]
    fn test_removal_matches_edited_descriptions() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        let payout = service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 1))
            .unwrap();

        // Simulate a hand-edited description that keeps the generated prefix
        let mut txns = storage.transactions.get_all().unwrap();
        txns[0].description = format!("{} (ajustado)", txns[0].description);
        storage.transactions.replace_all(txns).unwrap();

        service.delete(payout.id).unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_removal_spares_expenses_in_bonus_category() {
        let (_temp_dir, storage) = test_storage();
        let service = PayoutService::new(&storage);

        let payout = service
            .add(BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2))
            .unwrap();

        use crate::models::{Transaction, TransactionType, BONUS_CATEGORY};
        // An expense filed under the bonus category is not a generated record
        storage
            .transactions
            .upsert(Transaction::new(
                TransactionType::Expense,
                "13º Salário - presente",
                Money::from_cents(20000),
                date(2025, 6, 3),
                BONUS_CATEGORY,
            ))
            .unwrap();

        service.delete(payout.id).unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "13º Salário - presente");
    }
}
