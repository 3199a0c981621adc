//! Goodreads provider: fetching, parsing and search coordination
//!
//! This module contains the provider pipeline:
//! - HTTP page fetching behind the `PageFetcher` trait
//! - Search result parsing into detail page links
//! - Detail page parsing into metadata records
//! - Publication date phrase parsing
//! - Concurrent fan-out of detail page fetches

mod coordinator;
mod date;
mod detail_parser;
mod fetcher;
mod search_parser;
mod traits;

pub use coordinator::{GoodreadsProvider, PROVIDER_ID, PROVIDER_NAME};
pub use date::parse_date;
pub use detail_parser::{extract_record, parse_publication, parse_series, PublicationInfo};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use search_parser::extract_detail_urls;
pub use traits::{MetadataProvider, SearchOptions};
