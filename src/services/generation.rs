//! Transaction series generation
//!
//! Expands a single user entry into the concrete transaction records it
//! implies: recurring series step by calendar months with end-of-month
//! clamping, installment plans carry a position counter, salary series
//! cover a twelve month window, and bonus payouts split an amount into
//! thirty-day-spaced shares.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::{
    BonusPayout, Installment, Money, PaymentStatus, Person, Priority, Transaction,
    TransactionType, BONUS_CATEGORY, INSTALLMENT_TAG, RECURRING_TAG, SALARY_CATEGORY, WORK_TAG,
};

/// How many months a recurring series spans when unspecified
pub const DEFAULT_RECURRING_MONTHS: u32 = 12;

/// How many months of salary records a person generates
pub const SALARY_WINDOW_MONTHS: u32 = 12;

/// Days between consecutive bonus payout installments
pub const PAYOUT_STEP_DAYS: i64 = 30;

/// User-supplied template for a new transaction, before expansion
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub status: PaymentStatus,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            amount,
            date,
            category: category.into(),
            tags: Vec::new(),
            priority: None,
            status: PaymentStatus::Open,
        }
    }
}

/// Expansion mode selected when adding a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionMode {
    /// One record, exactly as entered
    Single,
    /// Monthly copies; `None` means the default window
    Recurring { months: Option<u32> },
    /// Remaining installments of a plan, starting at `current`
    Installment { current: u32, total: u32 },
}

/// Step a date forward by whole calendar months, clamping the day to the
/// end of shorter months. Jan 31 plus one month is Feb 28 (29 in leap
/// years), not Mar 3.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Build a date on the given day of a month, clamping the day to the
/// month's length. Day 1 exists for every valid month, so the search
/// always terminates.
pub fn date_on_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let clamped = day.clamp(1, 31);
    (1..=clamped)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or_default()
}

/// Append a tag unless it is already present
pub(crate) fn with_tag(mut tags: Vec<String>, tag: &str) -> Vec<String> {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
    tags
}

fn record_from(template: &NewTransaction) -> Transaction {
    let mut txn = Transaction::new(
        template.kind,
        template.description.clone(),
        template.amount,
        template.date,
        template.category.clone(),
    );
    txn.tags = template.tags.clone();
    txn.priority = template.priority;
    txn.status = Some(template.status);
    txn
}

/// Expand a template into the records its mode implies.
///
/// Every produced record gets a fresh identity. Recurring and installment
/// records carry their series tag even when the user did not supply it.
pub fn expand_template(template: &NewTransaction, mode: &ExpansionMode) -> Vec<Transaction> {
    match mode {
        ExpansionMode::Single => vec![record_from(template)],

        ExpansionMode::Recurring { months } => {
            let span = months.unwrap_or(DEFAULT_RECURRING_MONTHS);
            let tags = with_tag(template.tags.clone(), RECURRING_TAG);

            (0..span)
                .map(|i| {
                    let mut txn = record_from(template);
                    txn.date = add_months(template.date, i);
                    txn.tags = tags.clone();
                    txn
                })
                .collect()
        }

        ExpansionMode::Installment { current, total } => {
            let tags = with_tag(template.tags.clone(), INSTALLMENT_TAG);

            (*current..=*total)
                .map(|position| {
                    let mut txn = record_from(template);
                    txn.date = add_months(template.date, position - current);
                    txn.tags = tags.clone();
                    txn.installment = Some(Installment {
                        current: position,
                        total: *total,
                    });
                    txn
                })
                .collect()
        }
    }
}

/// Generate the twelve month salary series for a person.
///
/// The window starts in the month of `today`; each record lands on the
/// person's payment day, clamped to the month's length.
pub fn salary_series(person: &Person, today: NaiveDate) -> Vec<Transaction> {
    (0..SALARY_WINDOW_MONTHS)
        .map(|i| {
            let base = add_months(today, i);
            let date = date_on_day(base.year(), base.month(), person.payment_day);

            let mut txn = Transaction::new(
                TransactionType::Income,
                person.salary_description(),
                person.net_salary,
                date,
                SALARY_CATEGORY,
            );
            txn.tags = vec![
                RECURRING_TAG.to_string(),
                WORK_TAG.to_string(),
                person.name.clone(),
            ];
            txn.status = Some(PaymentStatus::Open);
            txn
        })
        .collect()
}

/// Generate the installment records for a bonus payout.
///
/// The amount is split into even cent shares (the first share absorbs the
/// remainder) spaced thirty days apart from the entry date.
pub fn payout_series(payout: &BonusPayout) -> Vec<Transaction> {
    let shares = payout.amount.split_even(payout.installments);

    shares
        .into_iter()
        .enumerate()
        .map(|(i, share)| {
            let date = payout.entry_date + chrono::Duration::days(PAYOUT_STEP_DAYS * i as i64);

            let mut txn = Transaction::new(
                TransactionType::Income,
                payout.installment_description(i as u32),
                share,
                date,
                BONUS_CATEGORY,
            );
            txn.tags = vec![BONUS_CATEGORY.to_string()];
            txn.status = Some(PaymentStatus::Open);
            txn
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 1, 31), 2), date(2025, 3, 31));
        assert_eq!(add_months(date(2025, 1, 15), 3), date(2025, 4, 15));
    }

    #[test]
    fn test_date_on_day_clamps() {
        assert_eq!(date_on_day(2025, 2, 31), date(2025, 2, 28));
        assert_eq!(date_on_day(2025, 4, 31), date(2025, 4, 30));
        assert_eq!(date_on_day(2025, 1, 5), date(2025, 1, 5));
    }

    #[test]
    fn test_single_produces_one_record() {
        let template = NewTransaction::new(
            TransactionType::Expense,
            "Luz",
            Money::from_cents(5000),
            date(2025, 1, 10),
            "Contas",
        );
        let records = expand_template(&template, &ExpansionMode::Single);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Luz");
        assert!(records[0].installment.is_none());
    }

    #[test]
    fn test_recurring_defaults_to_twelve_months() {
        let template = NewTransaction::new(
            TransactionType::Expense,
            "Aluguel",
            Money::from_cents(120000),
            date(2025, 1, 5),
            "Moradia",
        );
        let records = expand_template(&template, &ExpansionMode::Recurring { months: None });

        assert_eq!(records.len(), 12);
        assert_eq!(records[0].date, date(2025, 1, 5));
        assert_eq!(records[11].date, date(2025, 12, 5));
        assert!(records.iter().all(|t| t.has_tag(RECURRING_TAG)));

        let ids: std::collections::HashSet<_> = records.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_recurring_end_of_month_cadence() {
        let template = NewTransaction::new(
            TransactionType::Expense,
            "Assinatura",
            Money::from_cents(2990),
            date(2025, 1, 31),
            "Lazer",
        );
        let records = expand_template(&template, &ExpansionMode::Recurring { months: Some(3) });

        assert_eq!(records[0].date, date(2025, 1, 31));
        assert_eq!(records[1].date, date(2025, 2, 28));
        assert_eq!(records[2].date, date(2025, 3, 31));
    }

    #[test]
    fn test_installment_expansion_completeness() {
        let template = NewTransaction::new(
            TransactionType::Expense,
            "TV",
            Money::from_cents(30000),
            date(2025, 1, 15),
            "Casa",
        );
        let records = expand_template(&template, &ExpansionMode::Installment { current: 1, total: 3 });

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, date(2025, 1, 15));
        assert_eq!(records[1].date, date(2025, 2, 15));
        assert_eq!(records[2].date, date(2025, 3, 15));

        for (i, txn) in records.iter().enumerate() {
            let inst = txn.installment.as_ref().unwrap();
            assert_eq!(inst.current, i as u32 + 1);
            assert_eq!(inst.total, 3);
            assert_eq!(txn.amount.cents(), 30000);
            assert!(txn.has_tag(INSTALLMENT_TAG));
        }
    }

    #[test]
    fn test_installment_mid_plan_start() {
        let template = NewTransaction::new(
            TransactionType::Expense,
            "Notebook",
            Money::from_cents(80000),
            date(2025, 3, 10),
            "Casa",
        );
        let records = expand_template(&template, &ExpansionMode::Installment { current: 4, total: 6 });

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].installment.as_ref().unwrap().current, 4);
        assert_eq!(records[2].installment.as_ref().unwrap().current, 6);
        assert_eq!(records[2].date, date(2025, 5, 10));
    }

    #[test]
    fn test_series_tag_not_duplicated() {
        let mut template = NewTransaction::new(
            TransactionType::Expense,
            "Aluguel",
            Money::from_cents(120000),
            date(2025, 1, 5),
            "Moradia",
        );
        template.tags = vec![RECURRING_TAG.to_string()];

        let records = expand_template(&template, &ExpansionMode::Recurring { months: Some(2) });
        assert_eq!(records[0].tags.iter().filter(|t| *t == RECURRING_TAG).count(), 1);
    }

    #[test]
    fn test_salary_series_window_and_shape() {
        let person = Person::new("Ana", Money::from_cents(100000), 5);
        let records = salary_series(&person, date(2025, 3, 20));

        assert_eq!(records.len(), 12);
        assert_eq!(records[0].date, date(2025, 3, 5));
        assert_eq!(records[11].date, date(2026, 2, 5));

        for txn in &records {
            assert_eq!(txn.description, "Ana - Salário");
            assert_eq!(txn.category, SALARY_CATEGORY);
            assert!(txn.is_income());
            assert!(txn.has_tag(RECURRING_TAG));
            assert!(txn.has_tag(WORK_TAG));
            assert!(txn.has_tag("Ana"));
        }
    }

    #[test]
    fn test_salary_series_clamps_payment_day() {
        let person = Person::new("Ana", Money::from_cents(100000), 31);
        let records = salary_series(&person, date(2025, 1, 10));

        assert_eq!(records[0].date, date(2025, 1, 31));
        assert_eq!(records[1].date, date(2025, 2, 28));
        assert_eq!(records[3].date, date(2025, 4, 30));
    }

    #[test]
    fn test_payout_series_split_and_spacing() {
        let payout = BonusPayout::new(Money::from_cents(100000), date(2025, 6, 1), 2);
        let records = payout_series(&payout);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount.cents(), 50000);
        assert_eq!(records[1].amount.cents(), 50000);
        assert_eq!(records[0].date, date(2025, 6, 1));
        assert_eq!(records[1].date, date(2025, 7, 1));
        assert_eq!(records[0].description, "13º Salário - 1ª parcela");
        assert_eq!(records[1].description, "13º Salário - 2ª parcela");
        assert_eq!(records[0].category, BONUS_CATEGORY);
    }

    #[test]
    fn test_payout_series_remainder_goes_first() {
        let payout = BonusPayout::new(Money::from_cents(10001), date(2025, 6, 1), 2);
        let records = payout_series(&payout);

        assert_eq!(records[0].amount.cents(), 5001);
        assert_eq!(records[1].amount.cents(), 5000);
        let total: i64 = records.iter().map(|t| t.amount.cents()).sum();
        assert_eq!(total, 10001);
    }

    #[test]
    fn test_payout_series_uses_label() {
        let mut payout = BonusPayout::new(Money::from_cents(60000), date(2025, 11, 30), 1);
        payout.description = Some("Bônus anual".to_string());

        let records = payout_series(&payout);
        assert_eq!(records[0].description, "Bônus anual - 1ª parcela");
    }
}
