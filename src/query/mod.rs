//! Query module for turning free text into a catalog search URL

mod tokenizer;

pub use tokenizer::get_title_tokens;

/// Path and fixed parameters of the book search endpoint
const SEARCH_PATH: &str = "/search?search_type=books&search[query]=";

/// Builds the search page URL for a free-text query
///
/// The query is tokenized with joiner words kept, since "and" or "the" are
/// meaningful inside a title search. Each token is percent-encoded from its
/// UTF-8 bytes and the tokens are joined with `+`. A query that yields no
/// tokens is encoded as a single term instead.
///
/// # Arguments
///
/// * `base_url` - Root of the catalog site (a trailing slash is ignored)
/// * `raw_query` - The user's search text
///
/// # Examples
///
/// ```
/// use goodreads_meta::query::build_search_url;
///
/// let url = build_search_url("https://www.goodreads.com", "Foundation and Empire");
/// assert_eq!(
///     url,
///     "https://www.goodreads.com/search?search_type=books&search[query]=Foundation+and+Empire"
/// );
/// ```
pub fn build_search_url(base_url: &str, raw_query: &str) -> String {
    let tokens = get_title_tokens(raw_query, false);

    let joined = if tokens.is_empty() {
        urlencoding::encode(raw_query).into_owned()
    } else {
        tokens
            .iter()
            .map(|token| urlencoding::encode(token).into_owned())
            .collect::<Vec<_>>()
            .join("+")
    };

    format!("{}{}{}", base_url.trim_end_matches('/'), SEARCH_PATH, joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const BASE: &str = "https://www.goodreads.com";

    fn query_value(search_url: &str) -> String {
        let marker = "search[query]=";
        let start = search_url.find(marker).unwrap() + marker.len();
        search_url[start..].to_string()
    }

    #[test]
    fn test_basic_query() {
        assert_eq!(
            build_search_url(BASE, "The Hobbit"),
            "https://www.goodreads.com/search?search_type=books&search[query]=The+Hobbit"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            build_search_url("https://www.goodreads.com/", "Dune"),
            "https://www.goodreads.com/search?search_type=books&search[query]=Dune"
        );
    }

    #[test]
    fn test_utf8_tokens_are_percent_encoded() {
        let search_url = build_search_url(BASE, "Cien años de soledad");
        assert_eq!(query_value(&search_url), "Cien+a%C3%B1os+de+soledad");
    }

    #[test]
    fn test_noise_is_removed_before_encoding() {
        let search_url = build_search_url(
            BASE,
            "A Mind for Numbers: How to Excel at Math and Science (Even If You Flunked Algebra)",
        );
        assert_eq!(
            query_value(&search_url),
            "A+Mind+for+Numbers+How+to+Excel+at+Math+and+Science+Even+If+You+Flunked+Algebra"
        );
    }

    #[test]
    fn test_query_without_tokens_falls_back_to_raw_text() {
        let search_url = build_search_url(BASE, "...");
        assert_eq!(query_value(&search_url), "...");
    }

    #[test]
    fn test_raw_text_fallback_is_percent_encoded() {
        let search_url = build_search_url(BASE, "(2010)");
        assert_eq!(query_value(&search_url), "%282010%29");

        let search_url = build_search_url(BASE, "{ } [ ]");
        assert_eq!(query_value(&search_url), "%7B%20%7D%20%5B%20%5D");
        assert!(Url::parse(&search_url).is_ok());
    }

    #[test]
    fn test_query_value_is_well_formed() {
        for query in ["Les Misérables", "1,000 Places", "Ender's Game", "東京 物語"] {
            let search_url = build_search_url(BASE, query);
            assert!(Url::parse(&search_url).is_ok(), "{}", search_url);

            let value = query_value(&search_url);
            assert!(
                value.chars().all(|c| c.is_ascii_alphanumeric()
                    || matches!(c, '%' | '+' | '-' | '_' | '.' | '~')),
                "unexpected character in {}",
                value
            );
        }
    }
}
