//! Path management for fintrack
//!
//! Provides XDG-compliant path resolution for configuration and per-owner
//! data partitions.
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/fintrack` or `~/.config/fintrack`
//! 3. Windows: `%APPDATA%\fintrack`

use std::path::PathBuf;

use crate::error::FinError;

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FintrackPaths {
    /// Base directory for all fintrack data
    base_dir: PathBuf,
}

impl FintrackPaths {
    /// Create a new FintrackPaths instance
    ///
    /// Path resolution:
    /// 1. `FINTRACK_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/fintrack` or `~/.config/fintrack`
    /// 3. Windows: `%APPDATA%\fintrack`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FinError> {
        let base_dir = if let Ok(custom) = std::env::var("FINTRACK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FintrackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/fintrack/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/fintrack/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the data directory of one owner partition
    pub fn owner_data_dir(&self, owner: &str) -> PathBuf {
        self.data_dir().join(owner)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the user credential store
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Get the path to the session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to an owner's transactions.json
    pub fn transactions_file(&self, owner: &str) -> PathBuf {
        self.owner_data_dir(owner).join("transactions.json")
    }

    /// Get the path to an owner's categories.json
    pub fn categories_file(&self, owner: &str) -> PathBuf {
        self.owner_data_dir(owner).join("categories.json")
    }

    /// Get the path to an owner's tags.json
    pub fn tags_file(&self, owner: &str) -> PathBuf {
        self.owner_data_dir(owner).join("tags.json")
    }

    /// Get the path to an owner's people.json
    pub fn people_file(&self, owner: &str) -> PathBuf {
        self.owner_data_dir(owner).join("people.json")
    }

    /// Get the path to an owner's payouts.json
    pub fn payouts_file(&self, owner: &str) -> PathBuf {
        self.owner_data_dir(owner).join("payouts.json")
    }

    /// Ensure the base and owner data directories exist
    pub fn ensure_directories(&self, owner: &str) -> Result<(), FinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.owner_data_dir(owner))
            .map_err(|e| FinError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if fintrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("fintrack"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("fintrack"))
}
