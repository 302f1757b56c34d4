//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Target site and how pages are fetched
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Page layout selectors
    #[serde(default)]
    pub selectors: PageSelectors,

    /// Snapshot store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Report output
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        self.site.base_url()?;
        if self.storage.file_name.trim().is_empty() {
            return Err(AppError::validation("storage.file_name is empty"));
        }
        for (name, selector) in self.selectors.named() {
            if selector.trim().is_empty() {
                return Err(AppError::validation(format!("selectors.{name} is empty")));
            }
        }
        Ok(())
    }
}

/// How pages are obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Fetcher {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Headless Chrome (needs the `browser` feature)
    Chrome,
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root URL every listing path is joined to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default)]
    pub fetcher: Fetcher,
}

impl SiteConfig {
    /// Parsed `base_url`.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url '{}': {e}", self.base_url)))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            fetcher: Fetcher::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between page loads in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Snapshot store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Store file name inside the cache directory
    #[serde(default = "defaults::store_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            file_name: defaults::store_file_name(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// HTML report path, overwritten on every run
    #[serde(default = "defaults::report_path")]
    pub report_path: PathBuf,

    /// Open the report in the default browser once written
    #[serde(default = "defaults::open_report")]
    pub open_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: defaults::report_path(),
            open_report: defaults::open_report(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "https://www.pouet.net/".into()
    }

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pouetspy/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        250
    }

    pub fn store_file_name() -> String {
        "previous.json".into()
    }

    pub fn report_path() -> PathBuf {
        PathBuf::from("report.html")
    }
    pub fn open_report() -> bool {
        true
    }
}
