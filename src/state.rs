//! Filter state transitions.
//!
//! Every user interaction on the page is an [`Action`]; [`reduce`] folds it
//! into a new [`FilterState`]. Rendering and fetching live elsewhere.

use crate::models::{FilterState, Language, Sentiment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search box submit. Trimmed; blank submissions are ignored.
    SubmitSearch(String),
    ClearSearch,
    SelectCategory(String),
    ClearCategory,
    SelectSource(String),
    ClearSource,
    SelectSentiment(Sentiment),
    ClearSentiment,
    ToggleLanguage,
    SetLanguage(Language),
    /// Clears query, category, source and sentiment. Language is kept.
    ClearAll,
}

/// Apply one action to the filter state.
pub fn reduce(state: FilterState, action: Action) -> FilterState {
    match action {
        Action::SubmitSearch(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return state;
            }
            FilterState {
                query: Some(trimmed.to_string()),
                ..state
            }
        }
        Action::ClearSearch => FilterState {
            query: None,
            ..state
        },
        Action::SelectCategory(category) => FilterState {
            category: selection(category),
            ..state
        },
        Action::ClearCategory => FilterState {
            category: None,
            ..state
        },
        Action::SelectSource(source) => FilterState {
            source: selection(source),
            ..state
        },
        Action::ClearSource => FilterState {
            source: None,
            ..state
        },
        Action::SelectSentiment(sentiment) => FilterState {
            sentiment: Some(sentiment),
            ..state
        },
        Action::ClearSentiment => FilterState {
            sentiment: None,
            ..state
        },
        Action::ToggleLanguage => FilterState {
            language: state.language.toggled(),
            ..state
        },
        Action::SetLanguage(language) => FilterState { language, ..state },
        Action::ClearAll => FilterState::new(state.language),
    }
}

/// Picking the empty option of a selector is the same as clearing it.
fn selection(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> FilterState {
        FilterState::new(Language::En)
    }

    #[test]
    fn test_submit_search_trims() {
        let state = reduce(start(), Action::SubmitSearch("  election  ".to_string()));
        assert_eq!(state.query(), Some("election"));
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let state = reduce(start(), Action::SubmitSearch("old".to_string()));
        let state = reduce(state, Action::SubmitSearch("   ".to_string()));
        assert_eq!(state.query(), Some("old"));
    }

    #[test]
    fn test_each_filter_clears_independently() {
        let mut state = start();
        for action in [
            Action::SubmitSearch("rain".to_string()),
            Action::SelectCategory("weather".to_string()),
            Action::SelectSource("BBC".to_string()),
            Action::SelectSentiment(Sentiment::Negative),
        ] {
            state = reduce(state, action);
        }

        let state = reduce(state, Action::ClearCategory);
        assert_eq!(state.category(), None);
        assert_eq!(state.query(), Some("rain"));
        assert_eq!(state.source(), Some("BBC"));
        assert_eq!(state.sentiment(), Some(Sentiment::Negative));

        let state = reduce(state, Action::ClearSentiment);
        let state = reduce(state, Action::ClearSource);
        let state = reduce(state, Action::ClearSearch);
        assert_eq!(state, FilterState::new(Language::En));
    }

    #[test]
    fn test_selecting_empty_option_clears() {
        let state = reduce(start(), Action::SelectSource("BBC".to_string()));
        let state = reduce(state, Action::SelectSource(String::new()));
        assert_eq!(state.source, None);
    }

    #[test]
    fn test_clear_all_keeps_language() {
        let state = reduce(start(), Action::SetLanguage(Language::Hi));
        let state = reduce(state, Action::SubmitSearch("cricket".to_string()));
        let state = reduce(state, Action::SelectSentiment(Sentiment::Positive));
        let state = reduce(state, Action::ClearAll);
        assert_eq!(state, FilterState::new(Language::Hi));
    }

    #[test]
    fn test_toggle_language_round_trip() {
        let state = reduce(start(), Action::ToggleLanguage);
        assert_eq!(state.language, Language::Hi);
        let state = reduce(state, Action::ToggleLanguage);
        assert_eq!(state.language, Language::En);
    }
}
