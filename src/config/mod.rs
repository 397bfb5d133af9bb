//! Application Configuration
//!
//! `config.toml` in the platform config directory. Missing or empty files
//! yield defaults; the API token is stored encrypted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS, FETCH_ALL_LIMIT};
use crate::error::Result;
use crate::helpers::{decrypt_token, encrypt_token, get_or_create_config_dir};
use crate::services::Credential;

/// CRM API connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token (encrypted on disk)
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Page size requested when fetching a whole collection
    pub fetch_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fetch_limit: FETCH_ALL_LIMIT,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("fetch_limit", &self.fetch_limit)
            .finish()
    }
}

/// Browsing defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub page_size: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Root of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub browser: BrowserConfig,
}

impl AppConfig {
    /// `config.toml` in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let path = get_or_create_config_dir()?.join("config.toml");

        #[cfg(debug_assertions)]
        info!("Config file: {}", path.display());

        Ok(path)
    }

    /// Load from `path`; a missing or blank file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: AppConfig = toml::from_str(&content)?;
        // Hand-edited plaintext tokens are accepted as-is
        if let Some(token) = &config.api.token {
            config.api.token = Some(decrypt_token(token).unwrap_or_else(|_| token.clone()));
        }
        Ok(config)
    }

    /// Save to `path` with the token encrypted
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut stored = self.clone();
        if let Some(token) = &self.api.token {
            if !token.is_empty() {
                stored.api.token = Some(encrypt_token(token)?);
            }
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(&stored)?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Credential built from the configured token
    pub fn credential(&self) -> Credential {
        self.api
            .token
            .as_deref()
            .map(Credential::bearer)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("crm-browser-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load(&temp_path("missing.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.browser.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.api.fetch_limit, FETCH_ALL_LIMIT);
    }

    #[test]
    fn test_save_encrypts_and_load_decrypts() {
        let path = temp_path("roundtrip.toml");
        let mut config = AppConfig::default();
        config.api.base_url = "https://crm.example.com".to_string();
        config.api.token = Some("tok-123".to_string());
        config.browser.page_size = 25;
        config.save(&path).expect("save");

        let raw = fs::read_to_string(&path).expect("read");
        assert!(!raw.contains("tok-123"));

        let loaded = AppConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(loaded.credential().token(), Some("tok-123"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_and_plaintext_token() {
        let path = temp_path("partial.toml");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, "[api]\ntoken = \"plain\"\n").expect("write");

        let loaded = AppConfig::load(&path).expect("load");
        assert_eq!(loaded.api.token.as_deref(), Some("plain"));
        assert_eq!(loaded.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(loaded.browser, BrowserConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let path = temp_path("broken.toml");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, "[api\nbase_url = ").expect("write");
        assert!(AppConfig::load(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = AppConfig::default();
        config.api.token = Some("hidden".to_string());
        assert!(!format!("{config:?}").contains("hidden"));
    }
}
