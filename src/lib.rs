//! Goodreads-Meta: a Goodreads book metadata provider
//!
//! This crate implements a single metadata source for a book metadata
//! aggregator. A free-text query is turned into a Goodreads search, the
//! result page is scanned for book links, and every linked detail page is
//! fetched concurrently and scraped into a normalized [`MetadataRecord`].

pub mod config;
pub mod provider;
pub mod query;
pub mod record;

use thiserror::Error;

/// Main error type for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout or body decoding failure
    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Errors that make a whole detail page unusable
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    #[error("Invalid publication date: {0}")]
    Date(#[from] DateError),
}

/// Date phrase errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("year is not numeric in '{0}'")]
    InvalidYear(String),

    #[error("'{0}' is not a valid calendar date")]
    OutOfRange(String),
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use provider::{GoodreadsProvider, HttpFetcher, MetadataProvider, PageFetcher, SearchOptions};
pub use query::{build_search_url, get_title_tokens};
pub use record::{MetaSourceInfo, MetadataRecord};
