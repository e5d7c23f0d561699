//! Configuration handling for the assessment

use crate::phone::Region;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// LeadSquared connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    /// API region, e.g. "IN21"
    pub region: String,
    /// API host without the region prefix
    pub host: String,
    pub access_key: String,
    pub secret_key: String,
    /// Full Lead.Create URL, replacing the one derived from region and host
    pub endpoint: Option<String>,
    /// Request timeout in seconds, 0 disables it
    pub timeout_secs: u64,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            region: "IN21".to_string(),
            host: "leadsquared.com".to_string(),
            access_key: "sample".to_string(),
            secret_key: "sample".to_string(),
            endpoint: None,
            timeout_secs: 15,
        }
    }
}

impl CrmConfig {
    /// Lead.Create endpoint without credentials
    pub fn base_url(&self) -> String {
        format!(
            "https://api-{}.{}/v2/LeadManagement.svc/Lead.Create",
            self.region, self.host
        )
    }

    /// Request timeout; `None` when `timeout_secs` is 0
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// User configuration for the assessment
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// CRM endpoint and credentials
    pub crm: CrmConfig,
    /// Region preselected for the phone field
    pub default_region: Option<Region>,
    /// Override for the storage and log directory
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "hairassessment", "hair-assessment-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Directory for persisted answers and the log file
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(crate::storage::default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.crm.region, "IN21");
        assert_eq!(config.crm.host, "leadsquared.com");
        assert!(config.default_region.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_base_url() {
        let crm = CrmConfig::default();
        assert_eq!(
            crm.base_url(),
            "https://api-IN21.leadsquared.com/v2/LeadManagement.svc/Lead.Create"
        );
    }

    #[test]
    fn test_deserialize_partial_crm_section() {
        let json = r#"{"crm": {"access_key": "ak", "secret_key": "sk"}, "default_region": "gb"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.crm.access_key, "ak");
        assert_eq!(parsed.crm.secret_key, "sk");
        assert_eq!(parsed.crm.region, "IN21");
        assert_eq!(parsed.default_region, Some(Region::UnitedKingdom));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.crm, CrmConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"crm": {"region": "US11"}, "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.crm.region, "US11");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"crm": {"timeout_secs": 3}, "data_dir": "/tmp/x"}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.crm.timeout_secs, 3);
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_load_from_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_load_returns_ok() {
        // Either the default or whatever the user has on disk
        assert!(AppConfig::load().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let crm = CrmConfig::default();
        assert_eq!(crm.timeout(), Some(Duration::from_secs(15)));
        let crm = CrmConfig {
            timeout_secs: 0,
            ..CrmConfig::default()
        };
        assert_eq!(crm.timeout(), None);
    }
}
