//! Path resolution for daymark configuration and data files.
//!
//! All daymark data is stored in `~/.daymark/`:
//! - `config.yaml` - Main configuration file
//! - `daymark.db` - SQLite database for tasks and the profile

use std::path::PathBuf;

use crate::error::DaymarkError;

/// Paths to daymark configuration and data.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.daymark/`
    pub root: PathBuf,
    /// Config file: `~/.daymark/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.daymark/daymark.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DaymarkError> {
        let home = std::env::var("HOME").map_err(|_| {
            DaymarkError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".daymark")))
    }

    /// Use `root` if given, otherwise the home-directory default.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, DaymarkError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("daymark.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), DaymarkError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                DaymarkError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
