//! Title tokenizer shared by search URL construction
//!
//! Strips bibliographic noise (edition markers, format labels, bracketed
//! years) from a title and splits what remains into search terms.

use regex::Regex;
use std::sync::LazyLock;

/// Words dropped when joiner stripping is enabled
const JOINERS: &[&str] = &["a", "and", "the", "&"];

/// Ordered cleanup rules applied to a title before splitting
struct TitlePatterns {
    rules: Vec<(Regex, &'static str)>,
}

impl TitlePatterns {
    fn new() -> Self {
        let rules = vec![
            // (2010), (Omnibus), [Hardcover] and similar format labels
            (
                Regex::new(
                    r"(?i)[({\[](\d{4}|omnibus|anthology|hardcover|audiobook|audio\scd|paperback|turtleback|mass\s*market|edition|ed\.)[\])}]",
                )
                .expect("Invalid format label regex"),
                "",
            ),
            // any bracketed group mentioning an edition
            (
                Regex::new(r"(?i)[({\[].*?(edition|ed\.).*?[\]})]")
                    .expect("Invalid edition regex"),
                "",
            ),
            // thousands separators: 1,000 -> 1000
            (
                Regex::new(r"(\d+),(\d+)").expect("Invalid number separator regex"),
                "${1}${2}",
            ),
            // hyphens only when preceded by whitespace
            (Regex::new(r"\s-").expect("Invalid hyphen regex"), " "),
            (
                Regex::new(r#"[:,;!@$%^&*(){}.`~"\s\[\]/《》「」“”]"#)
                    .expect("Invalid punctuation regex"),
                " ",
            ),
        ];

        Self { rules }
    }
}

static TITLE_PATTERNS: LazyLock<TitlePatterns> = LazyLock::new(TitlePatterns::new);

/// Splits a title into search tokens
///
/// # Arguments
///
/// * `title` - Free-text title or query
/// * `strip_joiners` - Drop "a", "and", "the" and "&"
///
/// # Returns
///
/// The tokens in their original order
///
/// # Examples
///
/// ```
/// use goodreads_meta::query::get_title_tokens;
///
/// let tokens = get_title_tokens("The Hobbit (Paperback)", false);
/// assert_eq!(tokens, vec!["The", "Hobbit"]);
/// ```
pub fn get_title_tokens(title: &str, strip_joiners: bool) -> Vec<String> {
    let mut cleaned = title.to_string();
    for (pattern, replacement) in &TITLE_PATTERNS.rules {
        cleaned = pattern.replace_all(&cleaned, *replacement).into_owned();
    }

    cleaned
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .filter(|token| !strip_joiners || !JOINERS.contains(&token.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}
