//! User accounts and sessions
//!
//! Credentials live in a shared `users.json` keyed by username, with
//! passwords stored as Argon2id PHC hashes. The active session is a small
//! `session.json` holding the logged-in owner name. Authentication gates
//! which owner partition the CLI opens; it is not an encryption layer.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::FintrackPaths;
use crate::error::{FinError, FinResult};
use crate::storage::file_io::{read_json, write_json_atomic};

/// One stored user credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Serializable user collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    users: Vec<UserRecord>,
}

/// Credential store backed by users.json
pub struct UserStore {
    paths: FintrackPaths,
}

impl UserStore {
    pub fn new(paths: FintrackPaths) -> Self {
        Self { paths }
    }

    fn load(&self) -> FinResult<UserData> {
        read_json(&self.paths.users_file())
    }

    fn save(&self, data: &UserData) -> FinResult<()> {
        write_json_atomic(&self.paths.users_file(), data)
    }

    /// Register a new user with a hashed password
    pub fn add_user(&self, username: &str, password: &str) -> FinResult<()> {
        if username.trim().is_empty() {
            return Err(FinError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(FinError::Validation("Password is required".to_string()));
        }

        let mut data = self.load()?;
        if data.users.iter().any(|u| u.username == username) {
            return Err(FinError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| FinError::Auth(format!("Failed to hash password: {}", e)))?;

        data.users.push(UserRecord {
            username: username.to_string(),
            password_hash: hash.to_string(),
            created_at: Utc::now(),
        });
        self.save(&data)
    }

    /// Verify a username/password pair
    pub fn verify(&self, username: &str, password: &str) -> FinResult<bool> {
        let data = self.load()?;
        let Some(user) = data.users.iter().find(|u| u.username == username) else {
            return Ok(false);
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| FinError::Auth(format!("Corrupt password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Check whether a username exists
    pub fn exists(&self, username: &str) -> FinResult<bool> {
        let data = self.load()?;
        Ok(data.users.iter().any(|u| u.username == username))
    }
}

/// Active session state persisted in session.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

/// Session store backed by session.json
pub struct SessionStore {
    paths: FintrackPaths,
}

impl SessionStore {
    pub fn new(paths: FintrackPaths) -> Self {
        Self { paths }
    }

    /// Record the logged-in owner
    pub fn login(&self, owner: &str) -> FinResult<()> {
        let data = SessionData {
            owner: Some(owner.to_string()),
        };
        write_json_atomic(&self.paths.session_file(), &data)
    }

    /// Clear the session
    pub fn logout(&self) -> FinResult<()> {
        let data = SessionData::default();
        write_json_atomic(&self.paths.session_file(), &data)
    }

    /// Get the currently logged-in owner, if any
    pub fn current_owner(&self) -> FinResult<Option<String>> {
        let data: SessionData = read_json(&self.paths.session_file())?;
        Ok(data.owner)
    }
}

/// Resolve the effective owner for a command invocation.
///
/// Precedence: explicit `--owner` flag, then the `FINTRACK_OWNER`
/// environment variable (both handled by clap), then the session file.
pub fn resolve_owner(flag: Option<String>, session: &SessionStore) -> FinResult<String> {
    if let Some(owner) = flag {
        return Ok(owner);
    }
    match session.current_owner()? {
        Some(owner) => Ok(owner),
        None => Err(FinError::Auth(
            "No active session. Run 'fintrack login' or pass --owner".to_string(),
        )),
    }
}
