//! Catalog configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

/// Run configuration loaded from environment variables.
///
/// Environment variables are prefixed with `FDROID_CATALOG_`:
/// - `FDROID_CATALOG_INDEX_URL`: index document URL
/// - `FDROID_CATALOG_ICON_BASE_URL`: prefix joined with icon file names
/// - `FDROID_CATALOG_PLACEHOLDER_ICON_URL`: icon used when a package has none
/// - `FDROID_CATALOG_DETAIL_BASE_URL`: prefix of per-app detail pages
/// - `FDROID_CATALOG_TIMEOUT_SECS`: request timeout (default: 60)
/// - `FDROID_CATALOG_USER_AGENT`: client identifier sent upstream
/// - `FDROID_CATALOG_OUTPUT`: output file (default: apps.json)
/// - `FDROID_CATALOG_LOCALES`: comma separated locale preference order
/// - `FDROID_CATALOG_PLATFORM`: platform tag added to every record
/// - `FDROID_CATALOG_PRETTY`: indent the output (default: false)
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_index_url")]
    pub index_url: String,

    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    #[serde(default = "default_placeholder_icon_url")]
    pub placeholder_icon_url: String,

    #[serde(default = "default_detail_base_url")]
    pub detail_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Locale codes tried in order when resolving text fields
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,

    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default)]
    pub pretty: bool,
}

fn default_index_url() -> String {
    "https://f-droid.org/repo/index-v2.json".to_string()
}

fn default_icon_base_url() -> String {
    "https://f-droid.org/repo".to_string()
}

fn default_placeholder_icon_url() -> String {
    "https://f-droid.org/assets/ic_repo_app_default.png".to_string()
}

fn default_detail_base_url() -> String {
    "https://f-droid.org/packages/".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("fdroid-catalog/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output() -> PathBuf {
    PathBuf::from("apps.json")
}

fn default_locales() -> Vec<String> {
    vec!["en-US".to_string(), "en".to_string()]
}

fn default_platform() -> String {
    "android".to_string()
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `FDROID_CATALOG_`.
    pub fn from_env() -> CatalogResult<Self> {
        Ok(envy::prefixed("FDROID_CATALOG_").from_env::<CatalogConfig>()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> CatalogResult<()> {
        let required = [
            ("index_url", &self.index_url),
            ("icon_base_url", &self.icon_base_url),
            ("placeholder_icon_url", &self.placeholder_icon_url),
            ("platform", &self.platform),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CatalogError::Config(format!("{name} must not be empty")));
            }
        }

        if self.timeout_secs == 0 {
            return Err(CatalogError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.locales.iter().all(|l| l.trim().is_empty()) {
            return Err(CatalogError::Config(
                "at least one locale is required".to_string(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(CatalogError::Config("output path must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            icon_base_url: default_icon_base_url(),
            placeholder_icon_url: default_placeholder_icon_url(),
            detail_base_url: default_detail_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            output: default_output(),
            locales: default_locales(),
            platform: default_platform(),
            pretty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.index_url, "https://f-droid.org/repo/index-v2.json");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.locales, vec!["en-US", "en"]);
        assert!(config.user_agent.starts_with("fdroid-catalog/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_iter() {
        let vars = vec![
            ("FDROID_CATALOG_INDEX_URL".to_string(), "http://localhost:9000/index.json".to_string()),
            ("FDROID_CATALOG_LOCALES".to_string(), "it,en-US".to_string()),
            ("FDROID_CATALOG_TIMEOUT_SECS".to_string(), "5".to_string()),
            ("FDROID_CATALOG_PRETTY".to_string(), "true".to_string()),
        ];
        let config: CatalogConfig = envy::prefixed("FDROID_CATALOG_")
            .from_iter(vars)
            .unwrap();

        assert_eq!(config.index_url, "http://localhost:9000/index.json");
        assert_eq!(config.locales, vec!["it", "en-US"]);
        assert_eq!(config.timeout_secs, 5);
        assert!(config.pretty);
        assert_eq!(config.output, PathBuf::from("apps.json"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CatalogConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));

        let config = CatalogConfig {
            locales: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));

        let config = CatalogConfig {
            index_url: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));
    }
}
