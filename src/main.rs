//! # EchoBulletin
//!
//! A terminal client for the EchoBulletin news API. It reproduces the news
//! page: pick a language, narrow by search text, category, source or
//! sentiment, and read the matching articles as Markdown cards with a
//! sentiment badge and a resolved source name.
//!
//! ## Usage
//!
//! ```sh
//! echo_bulletin                                   # top headlines
//! echo_bulletin -l hi articles --sentiment positive
//! echo_bulletin plan -q election --source Reuters # show the request only
//! echo_bulletin categories
//! ```
//!
//! ## Architecture
//!
//! 1. **Planning**: filters map to exactly one backend endpoint
//! 2. **Fetching**: the page controller issues the request
//! 3. **Presenting**: each record becomes a display card
//! 4. **Output**: Markdown to stdout, optionally JSON to a file

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use echo_bulletin::api::NewsClient;
use echo_bulletin::cli::{Cli, Command, FilterArgs};
use echo_bulletin::config::Config;
use echo_bulletin::outputs::json::{CardExport, write_cards};
use echo_bulletin::outputs::markdown;
use echo_bulletin::page::{Page, PageView};
use echo_bulletin::planner::RequestDescriptor;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::resolve(&args)?;
    info!(
        api_base_url = %config.api_base_url,
        language = %config.language,
        "echo_bulletin starting up"
    );

    let command = args.command.unwrap_or(Command::Articles {
        filters: FilterArgs::default(),
        json_output: None,
    });

    match command {
        Command::Plan { filters } => {
            let mut page = Page::new(config.language);
            for action in filters.actions() {
                page.dispatch(action);
            }
            let request = RequestDescriptor::plan(page.filters());
            println!("{}", request.to_url(&config.api_base_url));
        }
        Command::Categories => {
            let client = NewsClient::from_config(&config)?;
            let mut page = Page::new(config.language);
            page.set_categories(client.fetch_categories(config.language).await);
            for category in page.categories() {
                println!("{category}");
            }
        }
        Command::Sources => {
            let client = NewsClient::from_config(&config)?;
            let mut page = Page::new(config.language);
            page.set_sources(client.fetch_sources(config.language).await);
            for source in page.sources() {
                println!("{source}");
            }
        }
        Command::Articles {
            filters,
            json_output,
        } => {
            let client = NewsClient::from_config(&config)?;
            let mut page = Page::new(config.language);
            for action in filters.actions() {
                page.dispatch(action);
            }
            page.load(&client).await;

            println!("{}", markdown::page_to_markdown(&page));

            if let Some(path) = json_output {
                let cards = match page.view() {
                    PageView::Articles(cards) => cards,
                    _ => Vec::new(),
                };
                let export = CardExport {
                    language: page.language(),
                    request: RequestDescriptor::plan(page.filters()).path_and_query(),
                    articles: &cards,
                };
                if let Err(e) = write_cards(&export, &path).await {
                    warn!(path = %path, error = %e, "Failed to write card JSON");
                }
            }

            if let Some(e) = page.error() {
                warn!(error = %e, "Article list unavailable");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}
