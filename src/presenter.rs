//! Display derivation for article cards.
//!
//! Turns one [`ArticleRecord`] into an [`ArticleView`]: a sentiment badge,
//! a human-readable source label, a calendar date and the badge placement.
//! Every record yields a view; missing data degrades to fixed fallbacks.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::models::{ArticleRecord, Language, SourceField};
use crate::utils::{non_empty, strip_www};

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNKNOWN_DATE: &str = "Unknown Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBadge {
    pub label: SentimentLabel,
    pub color_token: ColorToken,
}

impl SentimentBadge {
    pub fn text(&self) -> &'static str {
        match self.label {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }
}

/// Where a card shows its badge. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgePlacement {
    /// Over the top corner of the article image.
    Overlay,
    /// In the text block, below the source/date line.
    Inline,
}

/// Classify free-text sentiment into a badge.
///
/// Case-insensitive substring match; "positive" is tested first, so a value
/// mentioning both words is Positive.
pub fn classify_sentiment(sentiment: Option<&str>) -> Option<SentimentBadge> {
    let lower = non_empty(sentiment)?.to_lowercase();
    if lower.contains("positive") {
        Some(SentimentBadge {
            label: SentimentLabel::Positive,
            color_token: ColorToken::Green,
        })
    } else if lower.contains("negative") {
        Some(SentimentBadge {
            label: SentimentLabel::Negative,
            color_token: ColorToken::Red,
        })
    } else {
        None
    }
}

/// Resolve the label naming where an article came from.
///
/// Structured name, structured id, plain-string source, author, any other
/// source shape, the URL's hostname without `www.`, then "Unknown Source".
pub fn resolve_source(article: &ArticleRecord) -> String {
    let (name, id, plain) = match &article.source {
        Some(SourceField::Structured { name, id }) => (name.as_deref(), id.as_deref(), None),
        Some(SourceField::Plain(s)) => (None, None, Some(s.as_str())),
        _ => (None, None, None),
    };

    if let Some(found) = non_empty(name)
        .or(non_empty(id))
        .or(non_empty(plain))
        .or(non_empty(article.author.as_deref()))
    {
        return found.to_string();
    }

    if let Some(SourceField::Other(raw)) = &article.source {
        if let Some(text) = raw_source_text(raw) {
            return text;
        }
    }

    hostname_label(&article.url).unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

/// Text for a source value of an unexpected shape, if it carries any.
fn raw_source_text(raw: &Value) -> Option<String> {
    let text = match raw {
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(","),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn hostname_label(url: &str) -> Option<String> {
    let parsed = Url::parse(non_empty(Some(url))?).ok()?;
    let host = parsed.host_str()?;
    non_empty(Some(strip_www(host))).map(str::to_string)
}

/// Format `publishedAt` as a calendar date for the active language.
///
/// Accepts RFC 3339 timestamps, zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`, bare
/// dates and integer epoch milliseconds. Text dates are taken as written,
/// without shifting time zones; epoch values are read as UTC.
///
/// # Arguments
///
/// * `published_at` - The record's `publishedAt`, as text
/// * `language` - Selects `M/D/YYYY` (en) or `D/M/YYYY` (hi)
///
/// # Returns
///
/// The formatted date, or `"Unknown Date"` when absent or unparseable.
pub fn format_published(published_at: Option<&str>, language: Language) -> String {
    let Some(date) = non_empty(published_at).and_then(parse_calendar_date) else {
        return UNKNOWN_DATE.to_string();
    };
    match language {
        Language::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        Language::Hi => format!("{}/{}/{}", date.day(), date.month(), date.year()),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Everything a card needs, derived once per render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    pub date: String,
    pub badge: Option<SentimentBadge>,
    pub placement: BadgePlacement,
}

impl ArticleView {
    pub fn present(article: &ArticleRecord, language: Language) -> Self {
        let image_url = non_empty(article.image_url.as_deref()).map(str::to_string);
        let placement = if image_url.is_some() {
            BadgePlacement::Overlay
        } else {
            BadgePlacement::Inline
        };

        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            url: article.url.clone(),
            image_url,
            source: resolve_source(article),
            date: format_published(article.published_at.as_deref(), language),
            badge: classify_sentiment(article.sentiment.as_deref()),
            placement,
        }
    }

    /// The badge drawn over the image, if this card has one there.
    pub fn overlay_badge(&self) -> Option<SentimentBadge> {
        self.badge.filter(|_| self.placement == BadgePlacement::Overlay)
    }

    /// The badge drawn in the text block, if this card has one there.
    pub fn inline_badge(&self) -> Option<SentimentBadge> {
        self.badge.filter(|_| self.placement == BadgePlacement::Inline)
    }
}
