use serde::Deserialize;

/// Site searched when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://www.goodreads.com";

/// Number of detail pages fetched at the same time by default
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 5;

/// Upper bound accepted for `max-concurrent-fetches`
pub const MAX_CONCURRENT_FETCHES_LIMIT: usize = 100;

/// Main configuration structure for Goodreads-Meta
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Provider behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Root of the catalog site; search and detail links resolve against it
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Administrative switch; an inactive provider answers every search with no results
    #[serde(default = "default_active")]
    pub active: bool,

    /// Maximum number of detail pages fetched concurrently
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            active: default_active(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_active() -> bool {
    true
}

fn default_max_concurrent_fetches() -> usize {
    DEFAULT_MAX_CONCURRENT_FETCHES
}
