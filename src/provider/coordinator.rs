//! Search coordinator - fan-out of detail page fetches
//!
//! A search runs in two phases. The search page is fetched first and
//! scanned for book links; then every link is fetched and parsed on its own
//! task, with a semaphore capping how many fetches are in flight. Records
//! are collected in the order the tasks finish.

use crate::config::{ProviderConfig, MAX_CONCURRENT_FETCHES_LIMIT};
use crate::provider::detail_parser::extract_record;
use crate::provider::fetcher::{HttpFetcher, PageFetcher};
use crate::provider::search_parser::extract_detail_urls;
use crate::provider::traits::{MetadataProvider, SearchOptions};
use crate::query::build_search_url;
use crate::record::{MetaSourceInfo, MetadataRecord};
use crate::{FetchError, ProviderError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Provider identifier stamped on every record
pub const PROVIDER_ID: &str = "goodreads";

/// Human-readable provider name
pub const PROVIDER_NAME: &str = "Goodreads";

/// Goodreads metadata provider
///
/// The provider owns its fetcher; the fetcher is shared by reference count
/// with the detail tasks a search spawns and must therefore be safe to use
/// from several tasks at once (see [`PageFetcher`]).
pub struct GoodreadsProvider<F = HttpFetcher> {
    base_url: Url,
    source: MetaSourceInfo,
    fetcher: Arc<F>,
    max_concurrent_fetches: usize,
    active: AtomicBool,
}

impl GoodreadsProvider<HttpFetcher> {
    /// Creates a provider that talks to the configured site over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(GoodreadsProvider)` - Ready to search
    /// * `Err(ProviderError)` - Invalid base URL or HTTP client failure
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new()?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher + 'static> GoodreadsProvider<F> {
    /// Creates a provider that fetches pages through `fetcher`
    ///
    /// The fetch ceiling is clamped to the range accepted by config
    /// validation, so an unvalidated config cannot disable or overflow it.
    pub fn with_fetcher(config: &ProviderConfig, fetcher: F) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let source = MetaSourceInfo::new(
            PROVIDER_ID,
            PROVIDER_NAME,
            config.base_url.trim_end_matches('/'),
        );

        Ok(Self {
            base_url,
            source,
            fetcher: Arc::new(fetcher),
            max_concurrent_fetches: config
                .max_concurrent_fetches
                .clamp(1, MAX_CONCURRENT_FETCHES_LIMIT),
            active: AtomicBool::new(config.active),
        })
    }

    /// Builds the search page URL for a query
    pub fn search_url(&self, query: &str) -> String {
        build_search_url(self.base_url.as_str(), query)
    }

    /// Searches the catalog and returns one record per parsable detail page
    ///
    /// # Flow
    ///
    /// 1. Return nothing when the provider is inactive (no requests are made)
    /// 2. Fetch the search page; on failure log and return nothing
    /// 3. Extract the detail page links
    /// 4. Fetch and parse every detail page concurrently
    ///
    /// Detail pages that cannot be fetched or parsed are logged and skipped.
    /// The returned records are in completion order, not link order.
    pub async fn search_and_collect(&self, query: &str) -> Vec<MetadataRecord> {
        if !self.active.load(Ordering::Relaxed) {
            tracing::debug!("{} is inactive, skipping search for '{}'", PROVIDER_NAME, query);
            return Vec::new();
        }

        let search_url = self.search_url(query);
        tracing::debug!("Searching {}: {}", PROVIDER_NAME, search_url);

        let html = match self.fetcher.fetch(&search_url).await {
            Ok(html) => html,
            Err(e) => {
                log_fetch_error(&e);
                tracing::error!("{} get books failed for '{}'", PROVIDER_NAME, query);
                return Vec::new();
            }
        };

        let urls = extract_detail_urls(&html, &self.base_url);
        if urls.is_empty() {
            return Vec::new();
        }

        self.collect_records(urls).await
    }

    /// Fetches and parses a single detail page
    pub async fn fetch_record(&self, url: &str) -> Result<MetadataRecord> {
        fetch_and_extract(self.fetcher.as_ref(), url, &self.source).await
    }

    /// Runs one fetch-and-parse task per URL, at most
    /// `max_concurrent_fetches` at a time
    async fn collect_records(&self, urls: Vec<String>) -> Vec<MetadataRecord> {
        let total = urls.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut tasks = JoinSet::new();

        for url in urls {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Fetch semaphore closed: {}", e);
                    break;
                }
            };

            let fetcher = Arc::clone(&self.fetcher);
            let source = self.source.clone();

            tasks.spawn(async move {
                let _permit = permit;
                fetch_and_extract(fetcher.as_ref(), &url, &source).await
            });
        }

        let mut records = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(record)) => records.push(record),
                Ok(Err(e)) => {
                    if let ProviderError::Fetch(fetch_error) = &e {
                        log_fetch_error(fetch_error);
                    } else {
                        tracing::warn!("Skipping book: {}", e);
                    }
                }
                Err(e) => tracing::error!("Detail page task failed: {}", e),
            }
        }

        tracing::info!(
            "{} returned {} of {} books",
            PROVIDER_NAME,
            records.len(),
            total
        );

        records
    }
}

/// Fetches a detail page and extracts its record
///
/// The page markup is parsed inside a synchronous call, so no parsed
/// document is held across an await point.
async fn fetch_and_extract<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    source: &MetaSourceInfo,
) -> Result<MetadataRecord> {
    tracing::debug!("Fetching book page: {}", url);
    let html = fetcher.fetch(url).await?;

    extract_record(&html, url, source).map_err(|e| ProviderError::Extract {
        url: url.to_string(),
        source: e,
    })
}

fn log_fetch_error(error: &FetchError) {
    match error {
        FetchError::Status { .. } => tracing::error!("{}", error),
        FetchError::Transport { .. } => tracing::warn!("{}", error),
    }
}

#[async_trait]
impl<F: PageFetcher + 'static> MetadataProvider for GoodreadsProvider<F> {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// Cover fallback and locale are not used by this provider
    async fn search(&self, query: &str, _options: &SearchOptions) -> Vec<MetadataRecord> {
        self.search_and_collect(query).await
    }
}
