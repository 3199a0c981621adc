//! Normalized metadata record shared with the aggregator
//!
//! Every provider in the aggregator produces the same record shape. Absent
//! fields are `None`, which is distinct from an empty string or list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of the provider that produced a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSourceInfo {
    /// Provider identifier (e.g., "goodreads")
    pub id: String,
    /// Human-readable provider name
    pub description: String,
    /// Provider home page
    pub link: String,
}

impl MetaSourceInfo {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            link: link.into(),
        }
    }
}

/// Bibliographic metadata for one candidate book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Provider-scoped identifier, empty when unknown
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    /// Detail page the record was extracted from
    pub url: String,
    pub source: MetaSourceInfo,
    pub description: Option<String>,
    pub series: Option<String>,
    pub series_index: Option<u32>,
    /// Foreign identifiers such as ISBN
    pub identifiers: BTreeMap<String, String>,
    pub publisher: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub rating: Option<f64>,
    pub languages: Vec<String>,
    pub tags: Vec<String>,
    /// Cover image URL
    pub cover: Option<String>,
}

impl MetadataRecord {
    /// Creates a record with only its identity filled in
    pub fn new(url: impl Into<String>, source: MetaSourceInfo) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            authors: Vec::new(),
            url: url.into(),
            source,
            description: None,
            series: None,
            series_index: None,
            identifiers: BTreeMap::new(),
            publisher: None,
            published_date: None,
            rating: None,
            languages: Vec::new(),
            tags: Vec::new(),
            cover: None,
        }
    }
}
