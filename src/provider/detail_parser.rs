//! Book detail page parser
//!
//! Every field of a [`MetadataRecord`] is read by its own extractor. The
//! title and the author block are required; a page without them is not a
//! book page and fails as a whole. All other extractors return `None` when
//! their element is missing or malformed, leaving the field absent.

use crate::provider::date::{parse_date, trailing_year};
use crate::record::{MetaSourceInfo, MetadataRecord};
use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const TITLE_SELECTOR: &str = "h1#bookTitle";
const AUTHORS_SELECTOR: &str = "div#bookAuthors";
const AUTHOR_ENTRY_SELECTOR: &str = "div.authorName__container";
const AUTHOR_LABEL_SELECTOR: &str = "span";
const DESCRIPTION_SELECTOR: &str = "div#description span[style]";
const SERIES_SELECTOR: &str = "h2#bookSeries a";
const DETAILS_SELECTOR: &str = "div#details";
const DETAILS_ROW_SELECTOR: &str = "div.row";
const RATING_SELECTOR: &str = r#"span[itemprop="ratingValue"]"#;
const COVER_SELECTOR: &str = "img#coverImage";

const PUBLISHED_MARKER: &str = "Published";
const PUBLISHER_MARKER: &str = " by ";
const FIRST_MARKER: &str = "(first";
const FIRST_PUBLISHED_MARKER: &str = "(first published";

/// Publisher and date phrase read from the details block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationInfo {
    pub publisher: Option<String>,
    /// The date phrase chosen for parsing, if any
    pub date_phrase: Option<String>,
}

/// Extracts a metadata record from a book detail page
///
/// # Arguments
///
/// * `html` - The detail page markup
/// * `url` - The URL the page was fetched from
/// * `source` - Provider identity stamped on the record
///
/// # Errors
///
/// * `ExtractError::MissingElement` - the title or author block is absent
/// * `ExtractError::Date` - the chosen publication date has a non-numeric year
pub fn extract_record(
    html: &str,
    url: &str,
    source: &MetaSourceInfo,
) -> Result<MetadataRecord, ExtractError> {
    let document = Html::parse_document(html);

    let mut record = MetadataRecord::new(url, source.clone());
    record.id = book_id(url).unwrap_or_default();
    record.title = extract_title(&document)?;
    record.authors = extract_authors(&document)?;
    record.description = extract_description(&document);

    if let Some((series, series_index)) = extract_series(&document) {
        record.series = series;
        record.series_index = series_index;
    }

    let publication = extract_publication(&document);
    record.publisher = publication.publisher;
    record.published_date = publication
        .date_phrase
        .as_deref()
        .map(parse_date)
        .transpose()?;

    record.rating = extract_rating(&document);
    record.cover = extract_cover(&document);

    Ok(record)
}

/// First element matching `css`, if the selector parses and anything matches
fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text with every whitespace run collapsed to a single space
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|text| text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numeric book id from a `/book/show/<id>.<slug>` URL
fn book_id(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let mut segments = url.path_segments()?;

    if segments.next()? != "book" || segments.next()? != "show" {
        return None;
    }

    let id: String = segments
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    (!id.is_empty()).then_some(id)
}

fn extract_title(document: &Html) -> Result<String, ExtractError> {
    select_first(document, TITLE_SELECTOR)
        .map(|element| element_text(element).trim().to_string())
        .ok_or(ExtractError::MissingElement(TITLE_SELECTOR))
}

/// Reads the author names in page order
///
/// The author block itself is required. When an entry inside it has no
/// name label the layout is not the one expected, and the list degrades to
/// empty instead of returning a partial set.
fn extract_authors(document: &Html) -> Result<Vec<String>, ExtractError> {
    let container = select_first(document, AUTHORS_SELECTOR)
        .ok_or(ExtractError::MissingElement(AUTHORS_SELECTOR))?;

    let (Ok(entry_selector), Ok(label_selector)) = (
        Selector::parse(AUTHOR_ENTRY_SELECTOR),
        Selector::parse(AUTHOR_LABEL_SELECTOR),
    ) else {
        return Ok(Vec::new());
    };

    let mut authors = Vec::new();
    for entry in container.select(&entry_selector) {
        match entry.select(&label_selector).next() {
            Some(label) => authors.push(element_text(label).trim().to_string()),
            None => {
                tracing::warn!("Author entry without a name label, dropping author list");
                return Ok(Vec::new());
            }
        }
    }

    Ok(authors)
}

/// Reads the untruncated description
///
/// The page shows a shortened summary and keeps the full text in a hidden
/// sibling; only the hidden one is used.
fn extract_description(document: &Html) -> Option<String> {
    let description_selector = Selector::parse(DESCRIPTION_SELECTOR).ok()?;

    document
        .select(&description_selector)
        .find(|span| {
            span.value()
                .attr("style")
                .map(|style| {
                    style
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .collect::<String>()
                        .trim_end_matches(';')
                        .eq_ignore_ascii_case("display:none")
                })
                .unwrap_or(false)
        })
        .map(|span| span.inner_html().trim().to_string())
}

fn extract_series(document: &Html) -> Option<(Option<String>, Option<u32>)> {
    let link = select_first(document, SERIES_SELECTOR)?;
    Some(parse_series(&element_text(link)))
}

/// Splits a series label such as `"(Foundation #3)"` into name and index
///
/// A missing or non-integer index leaves the index absent but keeps the name.
pub fn parse_series(text: &str) -> (Option<String>, Option<u32>) {
    fn clean(part: &str) -> &str {
        part.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')')
    }

    let (name, index) = match text.split_once('#') {
        Some((name, index)) => (clean(name), clean(index).parse().ok()),
        None => (clean(text), None),
    };

    let name = (!name.is_empty()).then(|| name.to_string());
    (name, index)
}

fn extract_publication(document: &Html) -> PublicationInfo {
    let Some(details) = select_first(document, DETAILS_SELECTOR) else {
        return PublicationInfo::default();
    };

    let published_row = Selector::parse(DETAILS_ROW_SELECTOR).ok().and_then(|row_selector| {
        details
            .select(&row_selector)
            .map(collapsed_text)
            .find(|text| text.contains(PUBLISHED_MARKER))
    });

    let text = published_row.unwrap_or_else(|| collapsed_text(details));
    parse_publication(&text)
}

fn before_marker<'a>(text: &'a str, marker: &str) -> &'a str {
    text.find(marker).map_or(text, |index| &text[..index])
}

fn after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.find(marker).map(|index| &text[index + marker.len()..])
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// Parses `"Published <date> by <publisher> (first published <date>)"`
///
/// Every part is optional. When both a publication date and a first
/// publication date are present, the first publication date wins unless
/// both fall in the same year, in which case the (usually more precise)
/// publication date is kept.
pub fn parse_publication(text: &str) -> PublicationInfo {
    let (before, publisher) = match text.split_once(PUBLISHER_MARKER) {
        Some((before, after)) => (
            before,
            non_empty(before_marker(after, FIRST_MARKER)).map(str::to_string),
        ),
        None => (text, None),
    };

    let primary = after_marker(before, PUBLISHED_MARKER)
        .and_then(|rest| non_empty(before_marker(rest, FIRST_MARKER)));

    let first_published = after_marker(text, FIRST_PUBLISHED_MARKER)
        .and_then(|rest| non_empty(before_marker(rest, ")")));

    let date_phrase = match (primary, first_published) {
        (Some(primary), Some(first)) if trailing_year(primary) == trailing_year(first) => {
            Some(primary)
        }
        (primary, first) => first.or(primary),
    };

    PublicationInfo {
        publisher,
        date_phrase: date_phrase.map(str::to_string),
    }
}

fn extract_rating(document: &Html) -> Option<f64> {
    let element = select_first(document, RATING_SELECTOR)?;
    element_text(element)
        .trim()
        .parse()
        .ok()
        .filter(|rating: &f64| rating.is_finite())
}

fn extract_cover(document: &Html) -> Option<String> {
    let element = select_first(document, COVER_SELECTOR)?;
    element
        .value()
        .attr("src")
        .and_then(non_empty)
        .map(str::to_string)
}
