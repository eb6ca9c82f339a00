//! News API access.
//!
//! The module uses a trait-based design so the page can be exercised without
//! a network:
//! - [`Transport`]: Core trait, "GET this URL and hand me the body"
//! - [`HttpTransport`]: The `reqwest` implementation used by the binary
//! - [`NewsClient`]: Plans URLs, decodes JSON and maps failures into the
//!   coarse [`NewsError`] taxonomy
//!
//! No retries and no caching: a failed request surfaces immediately.

use std::time::{Duration, Instant};

use itertools::Itertools;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{NewsError, TransportError};
use crate::models::{ArticleRecord, Language};
use crate::planner::RequestDescriptor;
use crate::utils::truncate_for_log;

/// Something that can perform a GET and return the response body.
///
/// Non-success statuses are errors; the body is only returned for 2xx.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &Url) -> Result<String, TransportError>;
}

/// [`Transport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        let t0 = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Non-success response"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Response received"
        );
        Ok(body)
    }
}

/// Typed access to the news endpoints.
#[derive(Debug)]
pub struct NewsClient<T> {
    transport: T,
    base_url: Url,
}

impl NewsClient<HttpTransport> {
    /// Build the HTTP-backed client described by the resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )?;
        Ok(Self::new(transport, config.api_base_url.clone()))
    }
}

impl<T: Transport> NewsClient<T> {
    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the article list for a planned request.
    ///
    /// # Arguments
    ///
    /// * `request` - A descriptor from [`RequestDescriptor::plan`]
    ///
    /// # Returns
    ///
    /// The decoded records, or [`NewsError::ArticlesFetchFailed`] wrapping the
    /// transport or decode failure.
    #[instrument(level = "info", skip_all, fields(endpoint = %request.kind))]
    pub async fn fetch_articles(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Vec<ArticleRecord>, NewsError> {
        match self.get_json::<Vec<ArticleRecord>>(request).await {
            Ok(articles) => {
                info!(count = articles.len(), "Fetched articles");
                Ok(articles)
            }
            Err(e) => {
                error!(error = %e, "Article fetch failed");
                Err(NewsError::ArticlesFetchFailed(e))
            }
        }
    }

    /// Fetch the selectable categories for a language, deduplicated.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_categories(&self, language: Language) -> Result<Vec<String>, NewsError> {
        let request = RequestDescriptor::categories(language);
        match self.get_json::<Vec<String>>(&request).await {
            Ok(categories) => Ok(dedupe_labels(categories)),
            Err(e) => {
                error!(error = %e, "Error fetching categories");
                Err(NewsError::CategoriesLoadFailed(e))
            }
        }
    }

    /// Fetch the selectable sources for a language.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_sources(&self, language: Language) -> Result<Vec<String>, NewsError> {
        let request = RequestDescriptor::sources(language);
        match self.get_json::<Vec<String>>(&request).await {
            Ok(sources) => Ok(dedupe_labels(sources)),
            Err(e) => {
                error!(error = %e, "Error fetching sources");
                Err(NewsError::SourcesLoadFailed(e))
            }
        }
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<R, TransportError> {
        let url = request.to_url(&self.base_url);
        info!(%url, endpoint = %request.kind, "Calling news API");
        let body = self.transport.get(&url).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Response did not match the expected JSON shape"
            );
            TransportError::Decode(e)
        })
    }
}

/// Drop blank and repeated entries from a selector list, keeping first-seen order.
fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .filter(|label| !label.trim().is_empty())
        .unique()
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeTransport, client};
    use super::*;
    use crate::models::FilterState;

    #[tokio::test]
    async fn test_fetch_articles_hits_planned_url() {
        let transport = FakeTransport::new().ok(
            "/api/news/search?query=election&language=en",
            r#"[{"title": "Polls open", "url": "https://www.example.com/a"}]"#,
        );
        let client = client(transport);
        let mut filters = FilterState::new(Language::En);
        filters.query = Some("election".to_string());

        let articles = client
            .fetch_articles(&RequestDescriptor::plan(&filters))
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Polls open");
        assert_eq!(
            client.transport().requested(),
            vec!["/api/news/search?query=election&language=en".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_status_error_is_generic_failure() {
        let transport = FakeTransport::new().status("/api/news/top-headlines?language=en", 500);
        let client = client(transport);

        let err = client
            .fetch_articles(&RequestDescriptor::plan(&FilterState::default()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NewsError::ArticlesFetchFailed(TransportError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_articles_malformed_payload_is_generic_failure() {
        let transport =
            FakeTransport::new().ok("/api/news/top-headlines?language=hi", r#"{"error": "nope"}"#);
        let client = client(transport);

        let err = client
            .fetch_articles(&RequestDescriptor::plan(&FilterState::new(Language::Hi)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NewsError::ArticlesFetchFailed(TransportError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_categories_dedupes_and_drops_blank() {
        let transport = FakeTransport::new().ok(
            "/api/news/categories?language=en",
            r#"["business", "sports", "", "business", "health"]"#,
        );
        let client = client(transport);

        let categories = client.fetch_categories(Language::En).await.unwrap();
        assert_eq!(categories, vec!["business", "sports", "health"]);
    }

    #[tokio::test]
    async fn test_fetch_sources_failure_maps_to_sources_error() {
        let client = client(FakeTransport::new());
        let err = client.fetch_sources(Language::Hi).await.unwrap_err();
        assert!(matches!(err, NewsError::SourcesLoadFailed(_)));
        assert_eq!(
            client.transport().requested(),
            vec!["/api/news/sources?language=hi".to_string()]
        );
    }
}
