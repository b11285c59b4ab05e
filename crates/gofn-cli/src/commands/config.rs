//! `gofn config` command implementation
//!
//! Configuration is read from environment variables; this only shows the
//! effective values.

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Show all configuration
pub async fn show(config: &Config) -> Result<()> {
    println!("{}", "gofn Configuration:".cyan().bold());
    println!();
    for (key, value) in entries(config) {
        println!("{:<18} {}", format!("{}:", key), value);
    }
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  GOFN_QUICKGO_URL       - QuickGO services URL");
    println!("  GOFN_TIMEOUT_SECS      - Per-request timeout");
    println!("  GOFN_MAX_RETRIES       - Attempts per request");
    println!("  GOFN_RETRY_BACKOFF_MS  - Backoff before the first retry");
    println!("  GOFN_PAGE_SIZE         - Annotation page size (max 100)");
    println!("  GOFN_MAX_PAGES         - Annotation pages per protein");
    println!("  GOFN_CONCURRENCY       - Proteins resolved concurrently");
    println!("  GOFN_CACHE_DIR         - Graph snapshot directory");
    println!("  GOFN_LOG_LEVEL         - trace, debug, info, warn, error");

    Ok(())
}

fn entries(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("quickgo_url", config.quickgo.base_url.clone()),
        ("timeout_secs", config.quickgo.timeout_secs.to_string()),
        ("max_retries", config.quickgo.max_retries.to_string()),
        ("retry_backoff_ms", config.quickgo.retry_backoff_ms.to_string()),
        ("page_size", config.quickgo.page_size.to_string()),
        ("max_pages", config.quickgo.max_pages.to_string()),
        ("concurrency", config.concurrency.to_string()),
        ("graph_cache", config.default_graph_cache().display().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_show() {
        let result = show(&Config::default()).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_entries_cover_quickgo_settings() {
        let config = Config::default();
        let keys: Vec<_> = entries(&config).into_iter().map(|(key, _)| key).collect();
        assert!(keys.contains(&"quickgo_url"));
        assert!(keys.contains(&"graph_cache"));
        assert_eq!(keys.len(), 8);
    }
}
