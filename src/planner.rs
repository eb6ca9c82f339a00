//! Query planning: which backend endpoint serves the current filters.
//!
//! The planner is a total function from [`FilterState`] to a
//! [`RequestDescriptor`]. The branch order matters and is not commutative:
//!
//! | Filters set                         | Endpoint                          |
//! |-------------------------------------|-----------------------------------|
//! | none                                | `/api/news/top-headlines`         |
//! | query only                          | `/api/news/search`                |
//! | sentiment only                      | `/api/news/search-by-sentiment`   |
//! | anything else (category alone too)  | `/api/news/search-combined`       |
//!
//! Category and source have no single-filter endpoint of their own.

use crate::models::{FilterState, Language};
use std::fmt;
use url::Url;

/// The backend routes this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    TopHeadlines,
    Search,
    SearchBySentiment,
    SearchCombined,
    Categories,
    Sources,
}

impl EndpointKind {
    /// Route path, relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            EndpointKind::TopHeadlines => "/api/news/top-headlines",
            EndpointKind::Search => "/api/news/search",
            EndpointKind::SearchBySentiment => "/api/news/search-by-sentiment",
            EndpointKind::SearchCombined => "/api/news/search-combined",
            EndpointKind::Categories => "/api/news/categories",
            EndpointKind::Sources => "/api/news/sources",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndpointKind::TopHeadlines => "top-headlines",
            EndpointKind::Search => "search",
            EndpointKind::SearchBySentiment => "search-by-sentiment",
            EndpointKind::SearchCombined => "search-combined",
            EndpointKind::Categories => "categories",
            EndpointKind::Sources => "sources",
        };
        f.write_str(name)
    }
}

/// One backend request: the endpoint plus its ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub kind: EndpointKind,
    pub params: Vec<(&'static str, String)>,
}

impl RequestDescriptor {
    /// Pick the article endpoint for the given filters.
    ///
    /// No filter means top headlines. A lone query or a lone sentiment has
    /// its own route; everything else goes to `search-combined` carrying
    /// only the parameters that are set.
    ///
    /// # Arguments
    ///
    /// * `filters` - The current filter state; empty strings count as unset
    ///
    /// # Returns
    ///
    /// The endpoint and its parameters in wire order, `language` always
    /// included.
    pub fn plan(filters: &FilterState) -> Self {
        let language = filters.language.as_str().to_string();
        let query = filters.query();
        let category = filters.category();
        let source = filters.source();
        let sentiment = filters.sentiment();

        match (query, category, source, sentiment) {
            (None, None, None, None) => Self {
                kind: EndpointKind::TopHeadlines,
                params: vec![("language", language)],
            },
            (Some(q), None, None, None) => Self {
                kind: EndpointKind::Search,
                params: vec![("query", q.to_string()), ("language", language)],
            },
            (None, None, None, Some(s)) => Self {
                kind: EndpointKind::SearchBySentiment,
                params: vec![("sentiment", s.as_str().to_string()), ("language", language)],
            },
            _ => {
                let mut params = vec![("language", language)];
                if let Some(q) = query {
                    params.push(("query", q.to_string()));
                }
                if let Some(c) = category {
                    params.push(("category", c.to_string()));
                }
                if let Some(s) = source {
                    params.push(("source", s.to_string()));
                }
                if let Some(s) = sentiment {
                    params.push(("sentiment", s.as_str().to_string()));
                }
                Self {
                    kind: EndpointKind::SearchCombined,
                    params,
                }
            }
        }
    }

    /// The category list lookup for a language.
    pub fn categories(language: Language) -> Self {
        Self {
            kind: EndpointKind::Categories,
            params: vec![("language", language.as_str().to_string())],
        }
    }

    /// The source list lookup for a language.
    pub fn sources(language: Language) -> Self {
        Self {
            kind: EndpointKind::Sources,
            params: vec![("language", language.as_str().to_string())],
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Percent-encoded `key=value&...` in parameter order.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path and query, e.g. `/api/news/search?query=election&language=en`.
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", self.kind.path(), self.query_string())
    }

    /// Resolve against the configured API base, keeping any path prefix it has.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let prefix = base.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", prefix, self.kind.path()));
        url.set_query(Some(&self.query_string()));
        url.set_fragment(None);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    fn filters() -> FilterState {
        FilterState::new(Language::En)
    }

    #[test]
    fn test_no_filters_plans_top_headlines() {
        let plan = RequestDescriptor::plan(&filters());
        assert_eq!(plan.kind, EndpointKind::TopHeadlines);
        assert_eq!(plan.path_and_query(), "/api/news/top-headlines?language=en");
    }

    #[test]
    fn test_empty_strings_still_plan_top_headlines() {
        let mut state = FilterState::new(Language::Hi);
        state.query = Some(String::new());
        state.source = Some(String::new());
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::TopHeadlines);
        assert_eq!(plan.param("language"), Some("hi"));
    }

    #[test]
    fn test_query_only_plans_search() {
        let mut state = filters();
        state.query = Some("election".to_string());
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::Search);
        assert_eq!(plan.path_and_query(), "/api/news/search?query=election&language=en");
    }

    #[test]
    fn test_sentiment_only_plans_sentiment_endpoint() {
        let mut state = filters();
        state.sentiment = Some(Sentiment::Negative);
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::SearchBySentiment);
        assert_eq!(
            plan.path_and_query(),
            "/api/news/search-by-sentiment?sentiment=negative&language=en"
        );
    }

    #[test]
    fn test_category_alone_plans_combined() {
        let mut state = filters();
        state.category = Some("sports".to_string());
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::SearchCombined);
        assert_eq!(
            plan.path_and_query(),
            "/api/news/search-combined?language=en&category=sports"
        );
    }

    #[test]
    fn test_source_alone_plans_combined() {
        let mut state = filters();
        state.source = Some("BBC News".to_string());
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::SearchCombined);
        assert_eq!(plan.param("source"), Some("BBC News"));
        assert_eq!(plan.param("query"), None);
    }

    #[test]
    fn test_query_and_sentiment_plans_combined_with_all_set_params() {
        let mut state = filters();
        state.query = Some("rain".to_string());
        state.sentiment = Some(Sentiment::Positive);
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.kind, EndpointKind::SearchCombined);
        assert_eq!(
            plan.path_and_query(),
            "/api/news/search-combined?language=en&query=rain&sentiment=positive"
        );
    }

    #[test]
    fn test_every_filter_set_keeps_parameter_order() {
        let state = FilterState {
            query: Some("budget".to_string()),
            category: Some("business".to_string()),
            source: Some("Reuters".to_string()),
            sentiment: Some(Sentiment::Negative),
            language: Language::Hi,
        };
        let keys: Vec<_> = RequestDescriptor::plan(&state)
            .params
            .iter()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, vec!["language", "query", "category", "source", "sentiment"]);
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut state = filters();
        state.query = Some("climate & energy".to_string());
        let plan = RequestDescriptor::plan(&state);
        assert_eq!(plan.query_string(), "query=climate%20%26%20energy&language=en");
    }

    #[test]
    fn test_auxiliary_lookups() {
        assert_eq!(
            RequestDescriptor::categories(Language::Hi).path_and_query(),
            "/api/news/categories?language=hi"
        );
        assert_eq!(
            RequestDescriptor::sources(Language::En).path_and_query(),
            "/api/news/sources?language=en"
        );
    }

    #[test]
    fn test_to_url_against_base() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let mut state = filters();
        state.query = Some("election".to_string());
        let url = RequestDescriptor::plan(&state).to_url(&base);
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/news/search?query=election&language=en"
        );
    }

    #[test]
    fn test_to_url_keeps_base_path_prefix() {
        let base = Url::parse("https://proxy.example.com/echo/").unwrap();
        let url = RequestDescriptor::categories(Language::En).to_url(&base);
        assert_eq!(
            url.as_str(),
            "https://proxy.example.com/echo/api/news/categories?language=en"
        );
    }
}
