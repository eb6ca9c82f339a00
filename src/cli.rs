//! Command-line interface definitions for EchoBulletin.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Connection settings can also come from environment variables or a YAML
//! config file; flags win over both.

use clap::{Args, Parser, Subcommand};

use crate::models::{Language, Sentiment};
use crate::state::Action;

/// Command-line arguments for the EchoBulletin client.
///
/// # Examples
///
/// ```sh
/// # Top headlines in English
/// echo_bulletin
///
/// # Search, in Hindi, against a remote API
/// echo_bulletin --api-base-url https://news.example.com -l hi articles -q election
///
/// # Show which request a filter combination turns into
/// echo_bulletin plan --category sports --sentiment positive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the news API (scheme, host and port)
    #[arg(long, env = "ECHO_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Display language
    #[arg(short, long, value_enum, env = "ECHO_LANGUAGE")]
    pub language: Option<Language>,

    /// Optional path to a config.yaml file
    #[arg(short, long, env = "ECHO_CONFIG")]
    pub config: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "ECHO_REQUEST_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, env = "ECHO_USER_AGENT")]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and render the article list (default)
    Articles {
        #[command(flatten)]
        filters: FilterArgs,

        /// Also write the rendered cards as JSON to this file
        #[arg(short, long)]
        json_output: Option<String>,
    },
    /// Print the request the filters plan to, without fetching
    Plan {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the selectable categories
    Categories,
    /// List the selectable sources
    Sources,
}

/// The page filters, as flags.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Free-text search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category to narrow to
    #[arg(long)]
    pub category: Option<String>,

    /// Source to narrow to
    #[arg(short, long)]
    pub source: Option<String>,

    /// Sentiment to narrow to
    #[arg(long, value_enum)]
    pub sentiment: Option<Sentiment>,
}

impl FilterArgs {
    /// The page actions a user would take to reach these filters.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(q) = &self.query {
            actions.push(Action::SubmitSearch(q.clone()));
        }
        if let Some(c) = &self.category {
            actions.push(Action::SelectCategory(c.clone()));
        }
        if let Some(s) = &self.source {
            actions.push(Action::SelectSource(s.clone()));
        }
        if let Some(s) = self.sentiment {
            actions.push(Action::SelectSentiment(s));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["echo_bulletin"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_articles_with_filters() {
        let cli = Cli::parse_from([
            "echo_bulletin",
            "--api-base-url",
            "http://news.local:9000",
            "-l",
            "hi",
            "articles",
            "-q",
            "election",
            "--sentiment",
            "negative",
            "-j",
            "/tmp/cards.json",
        ]);

        assert_eq!(cli.api_base_url.as_deref(), Some("http://news.local:9000"));
        assert_eq!(cli.language, Some(Language::Hi));
        match cli.command {
            Some(Command::Articles {
                filters,
                json_output,
            }) => {
                assert_eq!(filters.query.as_deref(), Some("election"));
                assert_eq!(filters.sentiment, Some(Sentiment::Negative));
                assert_eq!(json_output.as_deref(), Some("/tmp/cards.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_plan_subcommand() {
        let cli = Cli::parse_from(["echo_bulletin", "plan", "--category", "sports"]);
        match cli.command {
            Some(Command::Plan { filters }) => {
                assert_eq!(filters.category.as_deref(), Some("sports"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_filter_args_to_actions() {
        let args = FilterArgs {
            query: Some("rain".to_string()),
            category: None,
            source: Some("BBC".to_string()),
            sentiment: Some(Sentiment::Positive),
        };
        assert_eq!(
            args.actions(),
            vec![
                Action::SubmitSearch("rain".to_string()),
                Action::SelectSource("BBC".to_string()),
                Action::SelectSentiment(Sentiment::Positive),
            ]
        );
    }
}
