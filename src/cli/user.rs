//! User and session CLI commands

use clap::Subcommand;

use crate::auth::{SessionStore, UserStore};
use crate::config::FintrackPaths;
use crate::error::{FinError, FinResult};

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Username (also names the data partition)
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn prompt_password(prompt: &str) -> FinResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| FinError::Auth(format!("Failed to read password: {}", e)))
}

/// Handle a user command
pub fn handle_user_command(paths: &FintrackPaths, cmd: UserCommands) -> FinResult<()> {
    let store = UserStore::new(paths.clone());

    match cmd {
        UserCommands::Add { username, password } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let first = prompt_password("Password: ")?;
                    let second = prompt_password("Confirm password: ")?;
                    if first != second {
                        return Err(FinError::Auth("Passwords do not match".to_string()));
                    }
                    first
                }
            };

            store.add_user(&username, &password)?;
            println!("Registered user: {}", username);
        }
    }

    Ok(())
}

/// Log a user in, verifying their credentials and recording the session
pub fn handle_login(
    paths: &FintrackPaths,
    username: &str,
    password: Option<String>,
) -> FinResult<()> {
    let store = UserStore::new(paths.clone());
    let session = SessionStore::new(paths.clone());

    let password = match password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };

    if !store.verify(username, &password)? {
        return Err(FinError::Auth("Invalid username or password".to_string()));
    }

    session.login(username)?;
    println!("Logged in as {}", username);
    Ok(())
}

/// Clear the active session
pub fn handle_logout(paths: &FintrackPaths) -> FinResult<()> {
    let session = SessionStore::new(paths.clone());

    match session.current_owner()? {
        Some(owner) => {
            session.logout()?;
            println!("Logged out {}", owner);
        }
        None => println!("No active session."),
    }
    Ok(())
}

/// Print the active session owner
pub fn handle_whoami(paths: &FintrackPaths) -> FinResult<()> {
    let session = SessionStore::new(paths.clone());

    match session.current_owner()? {
        Some(owner) => println!("{}", owner),
        None => println!("No active session."),
    }
    Ok(())
}
