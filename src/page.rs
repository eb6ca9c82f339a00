//! The news page controller.
//!
//! [`Page`] owns the filter state, the last article list, the auxiliary
//! selector lists and the loading/error flags. Actions go through
//! [`crate::state::reduce`]; fetches are tagged with a [`RequestToken`] and
//! only the most recently issued one may update the page, so a slow response
//! to an old filter combination can never overwrite a newer one.

use tracing::{debug, error, info, instrument};

use crate::api::{NewsClient, Transport};
use crate::error::NewsError;
use crate::models::{ArticleRecord, FilterState, Language};
use crate::planner::RequestDescriptor;
use crate::presenter::ArticleView;
use crate::state::{Action, reduce};

pub const NO_RESULTS_MESSAGE: &str = "No articles found for the selected filters.";
pub const INITIAL_MESSAGE: &str =
    "Use the search bar, categories, or sources above to find news articles.";

/// Monotonic tag identifying one article request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// An article request the page has committed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFetch {
    pub token: RequestToken,
    pub request: RequestDescriptor,
}

/// What has to be reloaded after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Nothing,
    Articles,
    /// Articles plus the category and source lists (language changed).
    All,
}

/// What the article area shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Error(String),
    Articles(Vec<ArticleView>),
    NoResults,
    Initial,
}

#[derive(Debug, Default)]
pub struct Page {
    filters: FilterState,
    articles: Vec<ArticleRecord>,
    loading: bool,
    error: Option<NewsError>,
    categories: Vec<String>,
    sources: Vec<String>,
    latest: RequestToken,
}

impl Page {
    pub fn new(language: Language) -> Self {
        Self {
            filters: FilterState::new(language),
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn language(&self) -> Language {
        self.filters.language
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn error(&self) -> Option<&NewsError> {
        self.error.as_ref()
    }

    /// Apply a user action and report what needs reloading.
    ///
    /// Clearing everything resets the article area to its initial message
    /// without a fetch and invalidates any request still in flight.
    pub fn dispatch(&mut self, action: Action) -> Refresh {
        let previous = self.filters.clone();
        let clear_all = action == Action::ClearAll;
        self.filters = reduce(previous.clone(), action);

        if clear_all {
            self.latest = self.next_token();
            self.articles.clear();
            self.error = None;
            self.loading = false;
            debug!("Cleared all filters");
            return Refresh::Nothing;
        }

        if self.filters == previous {
            Refresh::Nothing
        } else if self.filters.language != previous.language {
            Refresh::All
        } else {
            Refresh::Articles
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Commit to a new article request for the current filters.
    ///
    /// Any request begun earlier becomes stale: its response will be
    /// discarded by [`Page::complete_fetch`].
    ///
    /// # Returns
    ///
    /// The planned request together with the token its response must carry.
    pub fn begin_fetch(&mut self) -> ArticleFetch {
        self.latest = self.next_token();
        self.loading = true;
        self.error = None;
        let request = RequestDescriptor::plan(&self.filters);
        info!(token = self.latest.0, endpoint = %request.kind, "Planned article request");
        ArticleFetch {
            token: self.latest,
            request,
        }
    }

    /// Apply an article response.
    ///
    /// A failure clears the article list so stale cards are never shown
    /// next to the error.
    ///
    /// # Arguments
    ///
    /// * `token` - The token handed out by [`Page::begin_fetch`]
    /// * `result` - The articles, or the failure of that request
    ///
    /// # Returns
    ///
    /// `false` when the response was superseded and ignored.
    pub fn complete_fetch(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ArticleRecord>, NewsError>,
    ) -> bool {
        if token != self.latest {
            debug!(
                token = token.0,
                latest = self.latest.0,
                "Discarding stale article response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(e) => {
                self.articles.clear();
                self.error = Some(e);
            }
        }
        true
    }

    /// Store the category list; a failed lookup leaves nothing selectable.
    pub fn set_categories(&mut self, result: Result<Vec<String>, NewsError>) {
        self.categories = result.unwrap_or_else(|e| {
            error!(error = %e, "Categories unavailable");
            Vec::new()
        });
    }

    /// Store the source list; a failed lookup leaves nothing selectable.
    pub fn set_sources(&mut self, result: Result<Vec<String>, NewsError>) {
        self.sources = result.unwrap_or_else(|e| {
            error!(error = %e, "Sources unavailable");
            Vec::new()
        });
    }

    /// First load: articles for the current filters plus both selector lists.
    pub async fn load<T: Transport>(&mut self, client: &NewsClient<T>) {
        self.refresh(client, Refresh::All).await;
    }

    /// Dispatch an action and perform whatever reload it calls for.
    pub async fn apply<T: Transport>(&mut self, client: &NewsClient<T>, action: Action) {
        let refresh = self.dispatch(action);
        self.refresh(client, refresh).await;
    }

    #[instrument(level = "info", skip(self, client))]
    pub async fn refresh<T: Transport>(&mut self, client: &NewsClient<T>, refresh: Refresh) {
        match refresh {
            Refresh::Nothing => {}
            Refresh::Articles => {
                let fetch = self.begin_fetch();
                let result = client.fetch_articles(&fetch.request).await;
                self.complete_fetch(fetch.token, result);
            }
            Refresh::All => {
                let fetch = self.begin_fetch();
                let language = self.language();
                let (articles, categories, sources) = futures::join!(
                    client.fetch_articles(&fetch.request),
                    client.fetch_categories(language),
                    client.fetch_sources(language),
                );
                self.set_categories(categories);
                self.set_sources(sources);
                self.complete_fetch(fetch.token, articles);
            }
        }
    }

    /// What the article area should display.
    pub fn view(&self) -> PageView {
        if self.loading {
            return PageView::Loading;
        }
        if let Some(e) = &self.error {
            return PageView::Error(e.to_string());
        }
        if !self.articles.is_empty() {
            let language = self.language();
            return PageView::Articles(
                self.articles
                    .iter()
                    .map(|a| ArticleView::present(a, language))
                    .collect(),
            );
        }
        if self.filters.has_listing_filter() {
            PageView::NoResults
        } else {
            PageView::Initial
        }
    }

    fn next_token(&self) -> RequestToken {
        RequestToken(self.latest.0 + 1)
    }
}
