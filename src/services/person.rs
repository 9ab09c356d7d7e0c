//! Person service
//!
//! A person represents a salary earner. Adding one generates their twelve
//! month salary series; updating one regenerates the series from the new
//! values after removing the records identified by the old name. Matching
//! is by shape (income, salary category, "{name} - Salário" description),
//! not by stored identifiers, so hand-deleted records stay deleted.

use chrono::NaiveDate;

use crate::error::{FinError, FinResult};
use crate::models::{Money, Person, PersonId, Transaction, SALARY_CATEGORY};
use crate::storage::Storage;

use super::generation::salary_series;
use super::validation::validate_person;

/// Service for person management
pub struct PersonService<'a> {
    storage: &'a Storage,
}

impl<'a> PersonService<'a> {
    /// Create a new person service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn is_salary_record_for(txn: &Transaction, name: &str) -> bool {
        txn.is_income()
            && txn.category == SALARY_CATEGORY
            && txn.description == format!("{} - Salário", name)
    }

    fn remove_salary_records(&self, name: &str) -> FinResult<usize> {
        let txns = self.storage.transactions.get_all()?;
        let before = txns.len();
        let kept: Vec<Transaction> = txns
            .into_iter()
            .filter(|t| !Self::is_salary_record_for(t, name))
            .collect();
        let removed = before - kept.len();
        self.storage.transactions.replace_all(kept)?;
        Ok(removed)
    }

    /// Add a person and generate their salary series
    pub fn add(
        &self,
        name: &str,
        net_salary: Money,
        gross_salary: Option<Money>,
        thirteenth_salary: Option<Money>,
        payment_day: u32,
        today: NaiveDate,
    ) -> FinResult<Person> {
        let mut person = Person::new(name.trim(), net_salary, payment_day);
        person.gross_salary = gross_salary;
        if let Some(thirteenth) = thirteenth_salary {
            person.thirteenth_salary = thirteenth;
        }
        validate_person(&person)?;

        if self.storage.people.get_by_name(&person.name)?.is_some() {
            return Err(FinError::Duplicate {
                entity_type: "Person",
                identifier: person.name.clone(),
            });
        }

        self.storage.people.upsert(person.clone())?;
        self.storage
            .transactions
            .append_batch(salary_series(&person, today))?;

        self.storage.people.save()?;
        self.storage.transactions.save()?;
        Ok(person)
    }

    /// Get a person by ID
    pub fn get(&self, id: PersonId) -> FinResult<Person> {
        self.storage
            .people
            .get(id)?
            .ok_or_else(|| FinError::person_not_found(id.to_string()))
    }

    /// Get a person by exact name
    pub fn get_by_name(&self, name: &str) -> FinResult<Option<Person>> {
        self.storage.people.get_by_name(name)
    }

    /// Find a person by exact name or by ID prefix
    pub fn find(&self, reference: &str) -> FinResult<Option<Person>> {
        if let Some(person) = self.storage.people.get_by_name(reference)? {
            return Ok(Some(person));
        }

        let stripped = reference.strip_prefix("per-").unwrap_or(reference);
        Ok(self
            .storage
            .people
            .get_all()?
            .into_iter()
            .find(|p| p.id.as_uuid().to_string().starts_with(stripped)))
    }

    /// List all people, sorted by name
    pub fn list(&self) -> FinResult<Vec<Person>> {
        let mut people = self.storage.people.get_all()?;
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(people)
    }

    /// Update a person and regenerate their salary series.
    ///
    /// Records matching the old name are removed first, then a fresh
    /// twelve month window is generated from `today`.
    pub fn update(
        &self,
        id: PersonId,
        name: Option<&str>,
        net_salary: Option<Money>,
        gross_salary: Option<Money>,
        thirteenth_salary: Option<Money>,
        payment_day: Option<u32>,
        today: NaiveDate,
    ) -> FinResult<Person> {
        let mut person = self.get(id)?;
        let old_name = person.name.clone();

        if let Some(name) = name {
            person.name = name.trim().to_string();
        }
        if let Some(net_salary) = net_salary {
            person.net_salary = net_salary;
        }
        if let Some(gross_salary) = gross_salary {
            person.gross_salary = Some(gross_salary);
        }
        if let Some(thirteenth) = thirteenth_salary {
            person.thirteenth_salary = thirteenth;
        }
        if let Some(payment_day) = payment_day {
            person.payment_day = payment_day;
        }
        validate_person(&person)?;

        self.remove_salary_records(&old_name)?;
        self.storage.people.upsert(person.clone())?;
        self.storage
            .transactions
            .append_batch(salary_series(&person, today))?;

        self.storage.people.save()?;
        self.storage.transactions.save()?;
        Ok(person)
    }

    /// Delete a person and their salary records
    pub fn delete(&self, id: PersonId) -> FinResult<()> {
        let person = self.get(id)?;

        self.remove_salary_records(&person.name)?;
        self.storage.people.delete(id)?;

        self.storage.people.save()?;
        self.storage.transactions.save()
    }
}
