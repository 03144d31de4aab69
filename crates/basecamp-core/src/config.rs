use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROFILE: &str = "Default";

/// Account and browser profile chosen during setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub account_id: String,
    #[serde(default = "default_profile")]
    pub profile_name: String,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

impl Config {
    /// Build a config, falling back to the default profile when none is given.
    ///
    /// Both fields are trimmed. An empty account ID is rejected.
    pub fn new(account_id: &str, profile_name: &str) -> Result<Self> {
        let profile_name = match profile_name.trim() {
            "" => DEFAULT_PROFILE,
            name => name,
        };

        let config = Self {
            account_id: account_id.trim().to_string(),
            profile_name: profile_name.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.account_id.is_empty() {
            return Err(Error::Config("Account ID is required".to_string()));
        }
        if self.profile_name.is_empty() {
            return Err(Error::Config("Profile name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let config = Config::new("4123456", "Profile 1").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.account_id, "4123456");
        assert_eq!(loaded.profile_name, "Profile 1");
    }

    #[test]
    fn test_blank_profile_defaults() {
        let config = Config::new("99", "  ").unwrap();
        assert_eq!(config.profile_name, "Default");
    }

    #[test]
    fn test_missing_account_rejected() {
        let err = Config::new("", "Default").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_profile_field_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"account_id": "42"}"#).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.profile_name, "Default");
    }

    #[test]
    fn test_load_errors_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Config::load(&missing), Err(Error::Config(_))));

        let garbage = dir.path().join("bad.json");
        std::fs::write(&garbage, "not json").unwrap();
        assert!(matches!(Config::load(&garbage), Err(Error::Config(_))));

        let empty_id = dir.path().join("empty.json");
        std::fs::write(&empty_id, r#"{"account_id": "", "profile_name": "Default"}"#).unwrap();
        assert!(matches!(Config::load(&empty_id), Err(Error::Config(_))));
    }

    #[test]
    fn test_saved_file_uses_snake_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        Config::new("7", "Work").unwrap().save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"account_id\": \"7\""));
        assert!(raw.contains("\"profile_name\": \"Work\""));
    }
}
