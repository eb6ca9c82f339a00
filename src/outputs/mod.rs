//! Output generation for the rendered page.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders the page (navbar, selectors, article cards) to Markdown
//! - [`json`]: Writes the derived article cards to a JSON file

pub mod json;
pub mod markdown;
