//! Search result parser
//!
//! Pulls the candidate book links out of a search results page. Only the
//! title anchors of the result list are followed; navigation, author and
//! series links on the same page are ignored.

use scraper::{Html, Selector};
use url::Url;

/// Title anchor of a search result row
const BOOK_TITLE_SELECTOR: &str = r#"a.bookTitle[itemprop="url"]"#;

/// Extracts detail page URLs from a search results page
///
/// Links are resolved against `base_url` and returned in document order.
/// Duplicates are kept. An anchor without a usable `href` is skipped and
/// logged.
///
/// # Arguments
///
/// * `html` - The search page markup
/// * `base_url` - The catalog root used to resolve relative links
///
/// # Returns
///
/// Absolute detail page URLs, possibly empty
///
/// # Example
///
/// ```
/// use goodreads_meta::provider::extract_detail_urls;
/// use url::Url;
///
/// let html = r#"<a class="bookTitle" itemprop="url" href="/book/show/1.Dune">Dune</a>"#;
/// let base = Url::parse("https://www.goodreads.com").unwrap();
/// let urls = extract_detail_urls(html, &base);
/// assert_eq!(urls, vec!["https://www.goodreads.com/book/show/1.Dune"]);
/// ```
pub fn extract_detail_urls(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    let selector = match Selector::parse(BOOK_TITLE_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid book title selector: {:?}", e);
            return urls;
        }
    };

    let mut anchors = 0;
    for element in document.select(&selector) {
        anchors += 1;

        let Some(href) = element.value().attr("href") else {
            tracing::warn!("Book url can not be parsed: result anchor has no href");
            continue;
        };

        match base_url.join(href.trim()) {
            Ok(url) => urls.push(url.to_string()),
            Err(e) => tracing::warn!("Book url '{}' can not be resolved: {}", href, e),
        }
    }

    if anchors == 0 {
        tracing::warn!("No book found in search results (no matches or page layout changed)");
    } else {
        tracing::debug!("Found {} book links in {} result anchors", urls.len(), anchors);
    }

    urls
}
