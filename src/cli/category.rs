//! Category CLI commands

use clap::Subcommand;

use crate::error::{FinError, FinResult};
use crate::models::TransactionType;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category (a no-op when the name already exists)
    Add {
        /// Category name
        name: String,
        /// Hex color (e.g., "#22c55e")
        #[arg(short, long, default_value = "#64748b")]
        color: String,
        /// Icon name
        #[arg(short, long, default_value = "tag")]
        icon: String,
        /// Category type (income, expense)
        #[arg(short = 't', long, default_value = "expense")]
        r#type: String,
    },
    /// List all categories
    List,
    /// Edit a category
    #[command(alias = "update")]
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New hex color
        #[arg(long)]
        color: Option<String>,
        /// New icon name
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a category (transactions keep the name they were written with)
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            name,
            color,
            icon,
            r#type,
        } => {
            let kind = TransactionType::parse(&r#type).ok_or_else(|| {
                FinError::Validation(format!(
                    "Invalid category type: '{}'. Valid types: income, expense",
                    r#type
                ))
            })?;

            let category = service.add(&name, &color, &icon, kind)?;
            println!("Category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            let categories = service.list()?;
            if categories.is_empty() {
                println!("No categories found.");
            } else {
                for category in categories {
                    println!(
                        "{:<12}  {:<7}  {:<9}  {}",
                        category.id.to_string(),
                        category.kind,
                        category.color,
                        category.name
                    );
                }
            }
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
            icon,
        } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| FinError::category_not_found(&category))?;

            if name.is_none() && color.is_none() && icon.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, name.as_deref(), color.as_deref(), icon.as_deref())?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| FinError::category_not_found(&category))?;
            service.delete(found.id)?;
            println!("Deleted category: {}", found.name);
        }
    }

    Ok(())
}
