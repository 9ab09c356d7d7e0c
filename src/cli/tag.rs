//! Tag CLI commands

use clap::Subcommand;

use crate::error::{FinError, FinResult};
use crate::services::TagService;
use crate::storage::Storage;

/// Tag subcommands
#[derive(Subcommand)]
pub enum TagCommands {
    /// Add a tag (a no-op when the name already exists)
    Add {
        /// Tag name
        name: String,
        /// Hex color (e.g., "#ef4444")
        #[arg(short, long, default_value = "#64748b")]
        color: String,
    },
    /// List all tags
    List,
    /// Edit a tag
    #[command(alias = "update")]
    Edit {
        /// Tag name or ID
        tag: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New hex color
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a tag (transactions keep the name they were written with)
    Delete {
        /// Tag name or ID
        tag: String,
    },
}

/// Handle a tag command
pub fn handle_tag_command(storage: &Storage, cmd: TagCommands) -> FinResult<()> {
    let service = TagService::new(storage);

    match cmd {
        TagCommands::Add { name, color } => {
            let tag = service.add(&name, &color)?;
            println!("Tag: {}", tag.name);
            println!("  ID: {}", tag.id);
        }

        TagCommands::List => {
            let tags = service.list()?;
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for tag in tags {
                    println!("{:<12}  {:<9}  {}", tag.id.to_string(), tag.color, tag.name);
                }
            }
        }

        TagCommands::Edit { tag, name, color } => {
            let found = service
                .find(&tag)?
                .ok_or_else(|| FinError::tag_not_found(&tag))?;

            if name.is_none() && color.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, name.as_deref(), color.as_deref())?;
            println!("Updated tag: {}", updated.name);
        }

        TagCommands::Delete { tag } => {
            let found = service
                .find(&tag)?
                .ok_or_else(|| FinError::tag_not_found(&tag))?;
            service.delete(found.id)?;
            println!("Deleted tag: {}", found.name);
        }
    }

    Ok(())
}
