//! Publication date phrase parser
//!
//! Detail pages print dates as free English text: `"2003"`,
//! `"December 2003"` or `"June 30th 2010"`. The year is always the last
//! four characters; whatever comes before it is an optional month name
//! followed by an optional ordinal day.

use crate::DateError;
use chrono::{DateTime, TimeZone, Utc};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses a publication date phrase into midnight UTC of that day
///
/// Unknown month names fall back to January and a missing day to the
/// first of the month, so a bare year yields January 1st.
///
/// # Errors
///
/// * `DateError::InvalidYear` - the last four characters are not a number
/// * `DateError::OutOfRange` - the parts do not form a real calendar date
///
/// # Examples
///
/// ```
/// use goodreads_meta::provider::parse_date;
///
/// let date = parse_date("June 30th 2010").unwrap();
/// assert_eq!(date.to_rfc3339(), "2010-06-30T00:00:00+00:00");
/// ```
pub fn parse_date(phrase: &str) -> Result<DateTime<Utc>, DateError> {
    let phrase = phrase.trim();

    let year_start = phrase
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .ok_or_else(|| DateError::InvalidYear(phrase.to_string()))?;
    let (prefix, year_text) = phrase.split_at(year_start);

    if !year_text.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateError::InvalidYear(phrase.to_string()));
    }
    let year: i32 = year_text
        .parse()
        .map_err(|_| DateError::InvalidYear(phrase.to_string()))?;

    let (month, day) = if prefix.is_empty() {
        (1, Some(1))
    } else {
        // drop the separator in front of the year
        let mut chars = prefix.chars();
        chars.next_back();
        let rest = chars.as_str();

        match rest.split_once(' ') {
            Some((month_name, day_part)) => (month_number(month_name), leading_day(day_part)),
            None => (month_number(rest), Some(1)),
        }
    };

    let day = day.ok_or_else(|| DateError::OutOfRange(phrase.to_string()))?;

    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| DateError::OutOfRange(phrase.to_string()))
}

/// Maps an English month name to 1-12, defaulting to January
fn month_number(name: &str) -> u32 {
    let name = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
        .unwrap_or(1)
}

/// Reads the leading digits of a day such as "30th"
///
/// Returns `Some(1)` when there are no digits and `None` when the digits
/// do not fit a day number at all.
fn leading_day(day_part: &str) -> Option<u32> {
    let digits: String = day_part
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return Some(1);
    }
    digits.parse().ok()
}

/// Returns the trailing four characters of a phrase (its year)
pub(crate) fn trailing_year(phrase: &str) -> &str {
    let phrase = phrase.trim();
    match phrase.char_indices().rev().nth(3) {
        Some((index, _)) => &phrase[index..],
        None => phrase,
    }
}
