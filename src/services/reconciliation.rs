//! Load-time reconciliation
//!
//! Repairs the transaction collection against its generating entities:
//! bonus payouts must have every installment record, people must have a
//! twelve month salary window starting from today, and installment plans
//! must run out to their counter's total. Synthesized records get
//! fresh identities and open status. A run that finds nothing writes
//! nothing, so reconciliation is idempotent.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::error::FinResult;
use crate::models::{Money, Transaction, TransactionId, INSTALLMENT_TAG};
use crate::storage::Storage;

use super::generation::{payout_series, salary_series, with_tag};

/// Counts of synthesized records per family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub payout_records: usize,
    pub salary_records: usize,
    pub installment_records: usize,
}

impl ReconciliationReport {
    pub fn total(&self) -> usize {
        self.payout_records + self.salary_records + self.installment_records
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Service that repairs generated series
pub struct ReconciliationService<'a> {
    storage: &'a Storage,
}

impl<'a> ReconciliationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run all three repair families and persist in a single save when
    /// anything was synthesized.
    pub fn run(&self, today: NaiveDate) -> FinResult<ReconciliationReport> {
        let mut txns = self.storage.transactions.get_all()?;
        let mut report = ReconciliationReport::default();

        let payout_missing = self.missing_payout_records(&txns)?;
        report.payout_records = payout_missing.len();
        txns.extend(payout_missing);

        let salary_missing = self.missing_salary_records(&txns, today)?;
        report.salary_records = salary_missing.len();
        txns.extend(salary_missing);

        let installment_missing = missing_installment_records(&txns);
        report.installment_records = installment_missing.len();
        txns.extend(installment_missing);

        if !report.is_empty() {
            self.storage.transactions.replace_all(txns)?;
            self.storage.transactions.save()?;
        }
        Ok(report)
    }

    /// Expected payout installments absent from the collection.
    ///
    /// Presence is judged by shape (type, category, description, date),
    /// not by identifier, so user-created copies count.
    fn missing_payout_records(&self, txns: &[Transaction]) -> FinResult<Vec<Transaction>> {
        let mut missing = Vec::new();
        for payout in self.storage.payouts.get_all()? {
            for expected in payout_series(&payout) {
                if !txns.iter().any(|t| matches_shape(t, &expected)) {
                    missing.push(expected);
                }
            }
        }
        Ok(missing)
    }

    /// Expected salary records absent from the twelve month window
    /// starting at `today`. Records older than the window are left alone.
    fn missing_salary_records(
        &self,
        txns: &[Transaction],
        today: NaiveDate,
    ) -> FinResult<Vec<Transaction>> {
        let mut missing = Vec::new();
        for person in self.storage.people.get_all()? {
            for expected in salary_series(&person, today) {
                if !txns.iter().any(|t| matches_shape(t, &expected)) {
                    missing.push(expected);
                }
            }
        }
        Ok(missing)
    }
}

fn matches_shape(stored: &Transaction, expected: &Transaction) -> bool {
    stored.kind == expected.kind
        && stored.category == expected.category
        && stored.description == expected.description
        && stored.date == expected.date
}

fn shift_months(date: NaiveDate, delta: i64) -> NaiveDate {
    if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32)).unwrap_or(date)
    } else {
        date.checked_sub_months(Months::new((-delta) as u32)).unwrap_or(date)
    }
}

/// Missing tail positions of installment plans.
///
/// Plans are identified by (description, amount); the reference record is
/// the one with the highest position, and only positions past it are
/// synthesized, each landing the corresponding number of months away.
/// Positions below the reference were removed on purpose and stay removed.
fn missing_installment_records(txns: &[Transaction]) -> Vec<Transaction> {
    let mut groups: BTreeMap<(String, Money), Vec<&Transaction>> = BTreeMap::new();
    for txn in txns {
        if txn.installment.is_some() {
            groups
                .entry((txn.description.clone(), txn.amount))
                .or_default()
                .push(txn);
        }
    }

    let mut missing = Vec::new();
    for group in groups.values() {
        let Some(reference) = group
            .iter()
            .max_by_key(|t| t.installment.as_ref().map(|i| i.current))
        else {
            continue;
        };
        let Some(ref_inst) = reference.installment.clone() else {
            continue;
        };

        for position in ref_inst.current + 1..=ref_inst.total {
            let mut txn = (*reference).clone();
            txn.id = TransactionId::new();
            txn.date = shift_months(
                reference.date,
                position as i64 - ref_inst.current as i64,
            );
            txn.installment = Some(crate::models::Installment {
                current: position,
                total: ref_inst.total,
            });
            txn.tags = with_tag(txn.tags, INSTALLMENT_TAG);
            txn.status = Some(crate::models::PaymentStatus::Open);
            missing.push(txn);
        }
    }
    missing
}
