//! Table identifiers and the persisted table configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, StoreError};

/// Maximum accepted identifier length.
const MAX_IDENTIFIER_LEN: usize = 64;

/// A validated table identifier.
///
/// The hosted table service assigns deployment-specific names (for example
/// `projects_80001_7410`). They arrive through configuration rather than
/// user input, but they are also the only strings interpolated into SQL, so
/// construction whitelists them: ASCII letter or underscore first, then
/// letters, digits, and underscores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableId(String);

impl TableId {
    pub fn new(name: &str) -> Result<Self> {
        let mut chars = name.chars();
        let head_ok = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !head_ok || !tail_ok || name.len() > MAX_IDENTIFIER_LEN {
            return Err(StoreError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<TableId> for String {
    fn from(id: TableId) -> Self {
        id.0
    }
}

/// Which projects and votes tables this deployment addresses.
///
/// Replaces the original client's ambient browser storage with an explicit
/// lifecycle: [`TablesConfig::load`] at start, [`TablesConfig::save`] when a
/// provisioning step assigns new names. Missing file yields the default
/// local names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesConfig {
    pub projects: TableId,
    pub votes: TableId,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            projects: TableId("projects".to_string()),
            votes: TableId("votes".to_string()),
        }
    }
}

impl TablesConfig {
    /// Load from the default config file location. Falls back to defaults
    /// if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| StoreError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Persist to the default config file location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Config(e.to_string()))?;
        }
        self.save_to(&path)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string(self).map_err(|e| StoreError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Config file path: `$PODIUM_DATA_DIR/tables.toml`, or the platform
    /// default data directory.
    fn config_path() -> PathBuf {
        Self::data_dir().join("tables.toml")
    }

    /// Data directory resolution. Env var override first.
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("PODIUM_DATA_DIR") {
            return PathBuf::from(dir);
        }
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".podium"))
            .unwrap_or_else(|_| PathBuf::from("/tmp/podium"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(TableId::new("projects").is_ok());
        assert!(TableId::new("projects_80001_7410").is_ok());
        assert!(TableId::new("_votes").is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(TableId::new("").is_err());
        assert!(TableId::new("1projects").is_err());
        assert!(TableId::new("projects; DROP TABLE votes").is_err());
        assert!(TableId::new("pro-jects").is_err());
        assert!(TableId::new(&"p".repeat(65)).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = TablesConfig::default();
        assert_eq!(config.projects.as_str(), "projects");
        assert_eq!(config.votes.as_str(), "votes");
    }

    #[test]
    fn test_config_round_trip() {
        let config = TablesConfig {
            projects: TableId::new("projects_80001_7410").expect("valid"),
            votes: TableId::new("votes_80001_7411").expect("valid"),
        };
        let toml_str = toml::to_string(&config).expect("serialize");
        let parsed: TablesConfig = toml::from_str(&toml_str).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_rejects_bad_identifier() {
        let result: std::result::Result<TablesConfig, _> =
            toml::from_str("projects = \"p; DROP TABLE x\"\nvotes = \"votes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config =
            TablesConfig::load_from(Path::new("/nonexistent/podium/tables.toml")).expect("load");
        assert_eq!(config, TablesConfig::default());
    }
}
