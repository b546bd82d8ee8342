//! File locations for a session.

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a session keeps its data.
///
/// Loaded from TOML; every field is optional and falls back to the
/// defaults below, relative to the working directory.
///
/// ```toml
/// data_file = "state/debts.txt"
/// history_file = "state/history.txt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot of entity names and the debt matrix.
    pub data_file: PathBuf,
    /// Append-only audit log.
    pub history_file: PathBuf,
    /// `username password` pairs for the login gate.
    pub user_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("new_optimized_transactions.txt"),
            history_file: PathBuf::from("new_transaction_history.txt"),
            user_file: PathBuf::from("user_accounts.txt"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("new_optimized_transactions.txt"));
        assert_eq!(config.user_file, PathBuf::from("user_accounts.txt"));
    }

    #[test]
    fn test_partial_toml_falls_back() {
        let config = Config::from_toml("data_file = \"custom.txt\"\n").unwrap();
        assert_eq!(config.data_file, PathBuf::from("custom.txt"));
        assert_eq!(config.history_file, Config::default().history_file);
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("data_file = 3"),
            Err(StoreError::Config(_))
        ));
    }
}
