//! One-call search over an article collection.

use serde::Serialize;

use crate::config::SearchConfig;
use crate::query::{QueryParser, SearchQueryMatcher, StructuredQuery};
use crate::types::Article;

/// Matched articles together with the query that selected them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome<'a> {
    pub query: StructuredQuery,
    pub articles: Vec<&'a Article>,
    pub truncated: bool,
}

impl SearchOutcome<'_> {
    pub fn highlight_terms(&self) -> &[String] {
        self.query.highlight_terms()
    }

    pub fn count(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Parses `raw` and filters `articles` with the default settings.
pub fn search<'a>(raw: &str, articles: &'a [Article]) -> SearchOutcome<'a> {
    search_with_config(raw, articles, &SearchConfig::default())
}

/// Parses `raw` and filters `articles`, honoring the parallel threshold and
/// result limit of `config`.
pub fn search_with_config<'a>(
    raw: &str,
    articles: &'a [Article],
    config: &SearchConfig,
) -> SearchOutcome<'a> {
    let query = QueryParser::parse(raw);
    let mut matched =
        SearchQueryMatcher::compile(&query).filter_with_threshold(articles, config.parallel_threshold);

    let truncated = match config.max_results {
        Some(limit) if matched.len() > limit => {
            matched.truncate(limit);
            true
        }
        _ => false,
    };

    SearchOutcome {
        query,
        articles: matched,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Vec<Article> {
        vec![
            Article::new("1", "React Guide").with_body("hooks and state"),
            Article::new("2", "Vue Guide").with_body("composition api"),
            Article::new("3", "Notes").with_body("class components in React"),
        ]
    }

    #[test]
    fn search_returns_matches_and_highlight_terms() {
        let articles = index();
        let outcome = search("(React OR Vue) Guide -class", &articles);

        assert_eq!(outcome.count(), 2);
        assert_eq!(outcome.highlight_terms(), ["Guide", "React", "Vue"]);
        assert!(!outcome.truncated);
    }

    #[test]
    fn max_results_truncates() {
        let articles = index();
        let config = SearchConfig {
            max_results: Some(1),
            ..SearchConfig::default()
        };

        let outcome = search_with_config("guide", &articles, &config);
        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.articles[0].id, "1");
        assert!(outcome.truncated);
    }

    #[test]
    fn limit_equal_to_matches_is_not_truncated() {
        let articles = index();
        let config = SearchConfig {
            max_results: Some(2),
            ..SearchConfig::default()
        };
        assert!(!search_with_config("guide", &articles, &config).truncated);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let articles = index();
        let outcome = search("   ", &articles);
        assert!(outcome.is_empty());
        assert!(outcome.query.is_empty());
    }

    #[test]
    fn outcome_serializes_for_the_ui() {
        let articles = index();
        let json = serde_json::to_value(search("hooks", &articles)).expect("serialize outcome");
        assert_eq!(json["articles"][0]["articleId"], "1");
        assert_eq!(json["query"]["highlightTerms"][0], "hooks");
        assert_eq!(json["truncated"], false);
    }
}
