//! Configuration management for the gofn CLI
//!
//! Settings come from defaults, then `GOFN_*` environment variables (a
//! `.env` file is loaded by the binary), then command-line flags.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Public QuickGO REST endpoint.
pub const DEFAULT_QUICKGO_URL: &str = "https://www.ebi.ac.uk/QuickGO/services";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Annotation search page size; QuickGO caps it at 100.
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Proteins resolved concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Settings of the QuickGO client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickGoConfig {
    /// Base URL of the QuickGO services
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,

    /// Backoff before the second attempt; doubled for each further attempt
    pub retry_backoff_ms: u64,

    /// Annotation search page size
    pub page_size: u32,

    /// Upper bound on annotation pages fetched per protein
    pub max_pages: u32,
}

impl Default for QuickGoConfig {
    fn default() -> Self {
        QuickGoConfig {
            base_url: DEFAULT_QUICKGO_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl QuickGoConfig {
    pub fn builder() -> QuickGoConfigBuilder {
        QuickGoConfigBuilder::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("QuickGO base URL cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_retries == 0 {
            return Err("Max retries must be at least 1".to_string());
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
        }

        if self.max_pages == 0 {
            return Err("Max pages must be at least 1".to_string());
        }

        Ok(())
    }

    /// Backoff before attempt `attempt + 1`, after `attempt` failures.
    pub fn backoff_ms(&self, attempt: u32) -> u64 {
        let exponent = attempt.saturating_sub(1).min(16);
        self.retry_backoff_ms.saturating_mul(1u64 << exponent)
    }
}

/// Builder for QuickGoConfig
#[derive(Debug, Default)]
pub struct QuickGoConfigBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    retry_backoff_ms: Option<u64>,
    page_size: Option<u32>,
    max_pages: Option<u32>,
}

impl QuickGoConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = Some(ms);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    pub fn build(self) -> QuickGoConfig {
        let default = QuickGoConfig::default();

        QuickGoConfig {
            base_url: self
                .base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(default.base_url),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            max_retries: self.max_retries.unwrap_or(default.max_retries),
            retry_backoff_ms: self.retry_backoff_ms.unwrap_or(default.retry_backoff_ms),
            page_size: self.page_size.unwrap_or(default.page_size),
            max_pages: self.max_pages.unwrap_or(default.max_pages),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub quickgo: QuickGoConfig,

    /// Proteins resolved concurrently
    pub concurrency: usize,

    /// Default location of graph snapshots
    pub cache_dir: PathBuf,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| CliError::config("Could not determine cache directory"))?
            .join("gofn");

        Ok(Self {
            quickgo: QuickGoConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            cache_dir,
        })
    }

    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new()?;
        let mut quickgo = QuickGoConfig::builder();

        if let Ok(url) = std::env::var("GOFN_QUICKGO_URL") {
            quickgo = quickgo.base_url(url);
        }
        if let Some(secs) = env_number("GOFN_TIMEOUT_SECS")? {
            quickgo = quickgo.timeout_secs(secs);
        }
        if let Some(retries) = env_number("GOFN_MAX_RETRIES")? {
            quickgo = quickgo.max_retries(retries);
        }
        if let Some(ms) = env_number("GOFN_RETRY_BACKOFF_MS")? {
            quickgo = quickgo.retry_backoff_ms(ms);
        }
        if let Some(size) = env_number("GOFN_PAGE_SIZE")? {
            quickgo = quickgo.page_size(size);
        }
        if let Some(pages) = env_number("GOFN_MAX_PAGES")? {
            quickgo = quickgo.max_pages(pages);
        }
        config.quickgo = quickgo.build();

        if let Some(concurrency) = env_number("GOFN_CONCURRENCY")? {
            config.concurrency = concurrency;
        }
        if let Ok(cache) = std::env::var("GOFN_CACHE_DIR") {
            config.cache_dir = PathBuf::from(cache);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply the global command-line overrides.
    pub fn with_overrides(mut self, quickgo_url: Option<&str>, concurrency: Option<usize>) -> Result<Self> {
        if let Some(url) = quickgo_url {
            self.quickgo.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(concurrency) = concurrency {
            self.concurrency = concurrency;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.quickgo.validate().map_err(CliError::config)?;
        if self.concurrency == 0 {
            return Err(CliError::config("Concurrency must be at least 1"));
        }
        Ok(())
    }

    /// Default graph snapshot path inside the cache directory.
    pub fn default_graph_cache(&self) -> PathBuf {
        self.cache_dir.join("go-graph.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        // If we can't determine the cache directory, fall back to a local directory
        Self::new().unwrap_or_else(|_| Self {
            quickgo: QuickGoConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            cache_dir: PathBuf::from(".gofn-cache"),
        })
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::config(format!("{} must be a non-negative number, got '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
