//! Configuration module for Goodreads-Meta
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults
//! that point the provider at the live Goodreads site.
//!
//! # Example
//!
//! ```no_run
//! use goodreads_meta::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("goodreads.toml")).unwrap();
//! println!("Searching {}", config.provider.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT_FETCHES,
    MAX_CONCURRENT_FETCHES_LIMIT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
