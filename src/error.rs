//! Error types.
//!
//! [`TransportError`] is what the HTTP seam reports; [`NewsError`] is the
//! coarse taxonomy the page shows. Users only ever see the generic article
//! message; the wrapped transport error goes to the logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Failed to load categories")]
    CategoriesLoadFailed(#[source] TransportError),

    #[error("Failed to load sources")]
    SourcesLoadFailed(#[source] TransportError),

    #[error("Failed to fetch articles. Please try again.")]
    ArticlesFetchFailed(#[source] TransportError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid API base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
}
