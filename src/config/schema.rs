//! Configuration schema for userlink
//!
//! Configuration is stored at `~/.config/userlink/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server API settings
    pub api: ApiConfig,

    /// Query cache policy
    pub cache: CacheConfig,
}

/// Server API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the user service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3030".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Query cache policy
///
/// Data younger than `stale_time_secs` is served from cache without a
/// refetch; entries unused for `cache_time_secs` are evicted. The
/// `refetch_on_*` flags gate ambient refetch triggers; all are off by
/// default so fetches only happen on explicit reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds before cached data is considered stale (default: 10 minutes)
    pub stale_time_secs: u64,

    /// Seconds an unused entry is retained before eviction (default: 15 minutes)
    pub cache_time_secs: u64,

    /// Refetch stale data when a view mounts
    pub refetch_on_mount: bool,

    /// Refetch stale data when connectivity returns
    pub refetch_on_reconnect: bool,

    /// Refetch stale data when the window regains focus
    pub refetch_on_window_focus: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: 600,
            cache_time_secs: 900,
            refetch_on_mount: false,
            refetch_on_reconnect: false,
            refetch_on_window_focus: false,
        }
    }
}

impl CacheConfig {
    /// Staleness window as a duration
    pub fn stale_time(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.stale_time_secs as i64)
    }

    /// Retention window as a duration
    pub fn cache_time(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_time_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[cache]"));
    }

    #[test]
    fn default_cache_policy() {
        let config = Config::default();
        assert_eq!(config.cache.stale_time_secs, 600);
        assert_eq!(config.cache.cache_time_secs, 900);
        assert!(!config.cache.refetch_on_mount);
        assert!(!config.cache.refetch_on_reconnect);
        assert!(!config.cache.refetch_on_window_focus);
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [api]
            base_url = "https://api.example.com"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.cache.stale_time_secs, 600); // default preserved
    }
}
