//! Person CLI commands
//!
//! People are salary earners; their commands generate and regenerate the
//! twelve month salary series.

use chrono::Local;
use clap::Subcommand;

use crate::error::{FinError, FinResult};
use crate::services::PersonService;
use crate::storage::Storage;

use super::transaction::parse_amount;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person and generate their salary series
    Add {
        /// Person name
        name: String,
        /// Net monthly salary (e.g., "3500.00")
        salary: String,
        /// Gross monthly salary, for reference only
        #[arg(short = 'g', long)]
        gross: Option<String>,
        /// Expected 13th-salary total for the year
        #[arg(long)]
        thirteenth: Option<String>,
        /// Day of the month the salary lands on (1-31)
        #[arg(short = 'd', long, default_value = "5")]
        payment_day: u32,
    },
    /// List all people
    List,
    /// Edit a person and regenerate their salary series
    #[command(alias = "update")]
    Edit {
        /// Person name or ID
        person: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New net monthly salary
        #[arg(long)]
        salary: Option<String>,
        /// New gross monthly salary
        #[arg(long)]
        gross: Option<String>,
        /// New expected 13th-salary total
        #[arg(long)]
        thirteenth: Option<String>,
        /// New payment day (1-31)
        #[arg(long)]
        payment_day: Option<u32>,
    },
    /// Delete a person and their salary records
    Delete {
        /// Person name or ID
        person: String,
    },
}

/// Handle a person command
pub fn handle_person_command(storage: &Storage, cmd: PersonCommands) -> FinResult<()> {
    let service = PersonService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        PersonCommands::Add {
            name,
            salary,
            gross,
            thirteenth,
            payment_day,
        } => {
            let salary = parse_amount(&salary)?;
            let gross = gross.as_deref().map(parse_amount).transpose()?;
            let thirteenth = thirteenth.as_deref().map(parse_amount).transpose()?;
            let person = service.add(&name, salary, gross, thirteenth, payment_day, today)?;

            println!("Added person: {}", person.name);
            println!("  Net salary: {}", person.net_salary);
            if !person.thirteenth_salary.is_zero() {
                println!("  13th salary: {}", person.thirteenth_salary);
            }
            println!("  Payment day: {}", person.payment_day);
            println!("  ID: {}", person.id);
            println!("Generated 12 salary records.");
        }

        PersonCommands::List => {
            let people = service.list()?;
            if people.is_empty() {
                println!("No people found.");
            } else {
                for person in people {
                    println!(
                        "{:<12}  {:>12}  13º {:>10}  day {:>2}  {}",
                        person.id.to_string(),
                        person.net_salary.to_string(),
                        person.thirteenth_salary.to_string(),
                        person.payment_day,
                        person.name
                    );
                }
            }
        }

        PersonCommands::Edit {
            person,
            name,
            salary,
            gross,
            thirteenth,
            payment_day,
        } => {
            let found = service
                .find(&person)?
                .ok_or_else(|| FinError::person_not_found(&person))?;

            if name.is_none()
                && salary.is_none()
                && gross.is_none()
                && thirteenth.is_none()
                && payment_day.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let salary = salary.as_deref().map(parse_amount).transpose()?;
            let gross = gross.as_deref().map(parse_amount).transpose()?;
            let thirteenth = thirteenth.as_deref().map(parse_amount).transpose()?;
            let updated = service.update(
                found.id,
                name.as_deref(),
                salary,
                gross,
                thirteenth,
                payment_day,
                today,
            )?;
            println!("Updated person: {}", updated.name);
            println!("Regenerated salary records.");
        }

        PersonCommands::Delete { person } => {
            let found = service
                .find(&person)?
                .ok_or_else(|| FinError::person_not_found(&person))?;
            service.delete(found.id)?;
            println!("Deleted person: {} (salary records removed)", found.name);
        }
    }

    Ok(())
}
