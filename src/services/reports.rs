//! Aggregation and projection over transaction collections
//!
//! Pure functions over a slice of transactions. Callers fetch the
//! collection once and feed it through whichever views they need.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{
    Money, MonthlyProjection, PaymentStatus, Transaction, TransactionType,
};

use super::generation::{add_months, date_on_day};

/// Rolling or calendar window for report filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    /// Last seven days, anchor inclusive
    SevenDays,
    /// Last thirty days, anchor inclusive
    ThirtyDays,
    /// The anchor's calendar month
    Month,
}

/// Sum of amounts of one type.
///
/// With `include_paid = false`, expense records already marked paid are
/// excluded, which yields the outstanding amount instead of the committed
/// one. Income is always counted in full.
pub fn total(txns: &[Transaction], kind: TransactionType, include_paid: bool) -> Money {
    txns.iter()
        .filter(|t| t.kind == kind)
        .filter(|t| {
            include_paid
                || kind == TransactionType::Income
                || t.payment_status() != PaymentStatus::Paid
        })
        .map(|t| t.amount)
        .sum()
}

/// Income total minus expense total, both counted in full
pub fn balance(txns: &[Transaction]) -> Money {
    total(txns, TransactionType::Income, true) - total(txns, TransactionType::Expense, true)
}

/// One entry per calendar month from the earliest to the latest
/// transaction month, extended to cover the month of `today`. Entries are
/// chronological and months without records still appear with zeros.
pub fn monthly_projections(txns: &[Transaction], today: NaiveDate) -> Vec<MonthlyProjection> {
    let current = (today.year(), today.month());

    let mut lo = current;
    let mut hi = current;
    for txn in txns {
        let key = (txn.date.year(), txn.date.month());
        if key < lo {
            lo = key;
        }
        if key > hi {
            hi = key;
        }
    }

    let mut buckets: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();
    let mut cursor = date_on_day(lo.0, lo.1, 1);
    loop {
        let key = (cursor.year(), cursor.month());
        buckets.insert(key, (Money::zero(), Money::zero()));
        if key >= hi {
            break;
        }
        cursor = add_months(cursor, 1);
    }

    for txn in txns {
        if let Some(bucket) = buckets.get_mut(&(txn.date.year(), txn.date.month())) {
            match txn.kind {
                TransactionType::Income => bucket.0 = bucket.0 + txn.amount,
                TransactionType::Expense => bucket.1 = bucket.1 + txn.amount,
            }
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (income, expenses))| MonthlyProjection {
            year,
            month,
            income,
            expenses,
            balance: income - expenses,
        })
        .collect()
}

/// Full amount contributed to each category, sorted by name
pub fn totals_by_category(txns: &[Transaction]) -> Vec<(String, Money)> {
    let mut buckets: BTreeMap<String, Money> = BTreeMap::new();
    for txn in txns {
        let entry = buckets.entry(txn.category.clone()).or_insert_with(Money::zero);
        *entry = *entry + txn.amount;
    }
    buckets.into_iter().collect()
}

/// Full amount contributed to each tag, sorted by name.
///
/// A record with several tags counts fully in every one of its buckets,
/// so tag totals do not sum to the collection total.
pub fn totals_by_tag(txns: &[Transaction]) -> Vec<(String, Money)> {
    let mut buckets: BTreeMap<String, Money> = BTreeMap::new();
    for txn in txns {
        for tag in &txn.tags {
            let entry = buckets.entry(tag.clone()).or_insert_with(Money::zero);
            *entry = *entry + txn.amount;
        }
    }
    buckets.into_iter().collect()
}

/// Keep the records inside a period anchored at `today` shifted by
/// `month_offset` calendar months. Rolling windows count back from the
/// anchor inclusive; month mode uses the anchor's calendar month.
pub fn filter_by_period(
    txns: &[Transaction],
    period: PeriodFilter,
    month_offset: i32,
    today: NaiveDate,
) -> Vec<Transaction> {
    let anchor = if month_offset >= 0 {
        add_months(today, month_offset as u32)
    } else {
        today.checked_sub_months(chrono::Months::new((-month_offset) as u32))
            .unwrap_or(today)
    };

    let (start, end) = match period {
        PeriodFilter::SevenDays => (anchor - Duration::days(6), anchor),
        PeriodFilter::ThirtyDays => (anchor - Duration::days(29), anchor),
        PeriodFilter::Month => {
            let first = date_on_day(anchor.year(), anchor.month(), 1);
            let last = date_on_day(anchor.year(), anchor.month(), 31);
            (first, last)
        }
    };

    txns.iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}
