//! JSON export of rendered article cards.
//!
//! Writes the derived [`ArticleView`]s, not the raw API records, so the file
//! carries the resolved source label, formatted date and badge placement.
//!
//! ```json
//! {
//!   "language": "en",
//!   "request": "/api/news/search?query=election&language=en",
//!   "articles": [{ "title": "…", "source": "example.com", "badge": null, … }]
//! }
//! ```

use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::Language;
use crate::presenter::ArticleView;

#[derive(Debug, Serialize)]
pub struct CardExport<'a> {
    pub language: Language,
    pub request: String,
    pub articles: &'a [ArticleView],
}

/// Write the cards to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_cards(
    export: &CardExport<'_>,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(export)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = export.articles.len(), "Wrote card JSON");
    Ok(())
}
