//! Data models for filter state and the article records served by the news API.
//!
//! This module defines the core data structures used throughout the application:
//! - [`FilterState`]: The user's narrowing criteria at a point in time
//! - [`Language`] and [`Sentiment`]: The two closed vocabularies the API accepts
//! - [`ArticleRecord`]: One article as returned by the backend
//! - [`SourceField`]: The shapes the backend uses for an article's source
//!
//! The API speaks camelCase JSON, hence the `rename_all` attributes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::utils::non_empty;

/// Display language for the whole session.
///
/// Every data-fetching call receives the language explicitly; it is sent to
/// the API as the `language` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// The wire value sent in the `language` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// The other language of the two-valued toggle.
    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }

    /// Label shown on the navbar toggle, active language first.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Language::En => "EN | हिंदी",
            Language::Hi => "हिंदी | EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment filter value offered by the sentiment dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// The wire value sent in the `sentiment` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete set of user-chosen narrowing criteria.
///
/// Empty strings are treated exactly like absent values; use the accessor
/// methods rather than the raw fields when deciding whether a filter is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub language: Language,
}

impl FilterState {
    /// An unfiltered state in the given language.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// The search text, if any was submitted.
    pub fn query(&self) -> Option<&str> {
        non_empty(self.query.as_deref())
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn source(&self) -> Option<&str> {
        non_empty(self.source.as_deref())
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// True when a query, category or source is set.
    ///
    /// Sentiment is deliberately left out: an empty listing under a
    /// sentiment-only filter still shows the page's initial prompt.
    pub fn has_listing_filter(&self) -> bool {
        self.query().is_some() || self.category().is_some() || self.source().is_some()
    }
}

/// The shapes an article's `source` takes in API payloads.
///
/// Aggregated providers disagree: some send `{"id": .., "name": ..}`, the
/// backend DTO sends a plain string, and anything else is kept verbatim so
/// the source label can still fall back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SourceField {
    Structured {
        name: Option<String>,
        id: Option<String>,
    },
    Plain(String),
    Other(Value),
}

impl From<Value> for SourceField {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => SourceField::Plain(s),
            Value::Object(map) => SourceField::Structured {
                name: map.get("name").and_then(scalar_text),
                id: map.get("id").and_then(scalar_text),
            },
            other => SourceField::Other(other),
        }
    }
}

impl From<SourceField> for Value {
    fn from(source: SourceField) -> Self {
        match source {
            SourceField::Structured { name, id } => serde_json::json!({ "name": name, "id": id }),
            SourceField::Plain(s) => Value::String(s),
            SourceField::Other(v) => v,
        }
    }
}

/// Text form of a JSON scalar; `null` and containers yield nothing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One article as served by the article endpoints.
///
/// Every field tolerates absence, `null` and a scalar of the wrong type, so
/// one odd record can never fail the whole list. Numbers and booleans are
/// kept as text (an epoch-millisecond `publishedAt` stays formattable);
/// objects and arrays in text fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sentiment: Option<String>,
    #[serde(default, alias = "sourceName")]
    pub source: Option<SourceField>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}
