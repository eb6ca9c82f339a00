//! Markdown rendering of the news page.
//!
//! Layout, top to bottom: navbar (title and language toggle), the category
//! and source selectors, the active filters, then the article area.
//!
//! ```text
//! # EchoBulletin                     EN | हिंदी
//! **Categories:** business · [sports] · health
//! **Sources:** BBC · Reuters
//! **Filters:** category=sports
//!
//! ## Title
//! ![Title](https://img…)  ⟶ overlay badge line
//! Description
//! *Source* · 5/6/2025
//! Sentiment: Negative    ⟶ only when there is no image
//! [Read more →](https://…)
//! ```

use crate::models::FilterState;
use crate::page::{INITIAL_MESSAGE, NO_RESULTS_MESSAGE, Page, PageView};
use crate::presenter::ArticleView;

pub const SITE_TITLE: &str = "EchoBulletin";

/// Render the whole page.
pub fn page_to_markdown(page: &Page) -> String {
    let filters = page.filters();
    let mut md = String::new();

    md.push_str(&format!(
        "# {}\n\n`{}`\n\n",
        SITE_TITLE,
        filters.language.toggle_label()
    ));

    if !page.categories().is_empty() {
        md.push_str(&format!(
            "**Categories:** {}\n\n",
            selector_line(page.categories(), filters.category())
        ));
    }
    if !page.sources().is_empty() {
        md.push_str(&format!(
            "**Sources:** {}\n\n",
            selector_line(page.sources(), filters.source())
        ));
    }
    if let Some(summary) = filter_summary(filters) {
        md.push_str(&format!("**Filters:** {}\n\n", summary));
    }

    md.push_str(&view_to_markdown(&page.view()));
    md
}

/// Render just the article area.
pub fn view_to_markdown(view: &PageView) -> String {
    match view {
        PageView::Loading => "_Loading articles..._\n".to_string(),
        PageView::Error(message) => format!("**{}** (dismiss to continue)\n", message),
        PageView::NoResults => format!("{}\n", NO_RESULTS_MESSAGE),
        PageView::Initial => format!("{}\n", INITIAL_MESSAGE),
        PageView::Articles(cards) => cards
            .iter()
            .map(card_to_markdown)
            .collect::<Vec<_>>()
            .join("\n---\n\n"),
    }
}

/// Render one article card.
pub fn card_to_markdown(card: &ArticleView) -> String {
    let mut md = format!("## {}\n\n", card.title);

    if let Some(image) = &card.image_url {
        md.push_str(&format!("![{}]({})\n", card.title, image));
        if let Some(badge) = card.overlay_badge() {
            md.push_str(&format!("> **{}**\n", badge.text()));
        }
        md.push('\n');
    }

    if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
        md.push_str(&format!("{}\n\n", description));
    }

    md.push_str(&format!("*{}* · {}\n\n", card.source, card.date));

    if let Some(badge) = card.inline_badge() {
        md.push_str(&format!("Sentiment: **{}**\n\n", badge.text()));
    }

    md.push_str(&format!("[Read more →]({})\n", card.url));
    md
}

fn selector_line(options: &[String], selected: Option<&str>) -> String {
    options
        .iter()
        .map(|option| {
            if Some(option.as_str()) == selected {
                format!("[{}]", option)
            } else {
                option.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

fn filter_summary(filters: &FilterState) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(q) = filters.query() {
        parts.push(format!("query=\"{}\"", q));
    }
    if let Some(c) = filters.category() {
        parts.push(format!("category={}", c));
    }
    if let Some(s) = filters.source() {
        parts.push(format!("source={}", s));
    }
    if let Some(s) = filters.sentiment() {
        parts.push(format!("sentiment={}", s));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}
