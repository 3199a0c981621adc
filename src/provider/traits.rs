use crate::record::MetadataRecord;
use async_trait::async_trait;

/// Search options shared by every provider in the aggregator
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Cover URL to fall back on when a provider has none
    pub generic_cover: String,
    /// Preferred locale (e.g., "en")
    pub locale: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            generic_cover: String::new(),
            locale: "en".to_string(),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generic_cover(mut self, generic_cover: impl Into<String>) -> Self {
        self.generic_cover = generic_cover.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Core trait for metadata providers
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Provider identifier (e.g., "goodreads")
    fn id(&self) -> &'static str;

    /// Human-readable provider name
    fn name(&self) -> &'static str;

    /// Whether the provider currently takes part in searches
    fn is_active(&self) -> bool;

    /// Enables or disables the provider
    fn set_active(&self, active: bool);

    /// Searches for books matching a free-text query
    ///
    /// Network and page failures are logged and never surface as errors;
    /// they only reduce the number of records returned.
    async fn search(&self, query: &str, options: &SearchOptions) -> Vec<MetadataRecord>;
}
