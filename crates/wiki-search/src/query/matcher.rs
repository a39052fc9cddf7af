//! Query matcher for article search.

use rayon::prelude::*;

use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::types::Article;

use super::expression::StructuredQuery;
use super::text_match::{SearchableText, TermFinder};

/// A compiled query matcher.
///
/// Every term is lowercased once at compile time; matching an article only
/// lowercases the article text.
#[derive(Debug, Clone)]
pub struct SearchQueryMatcher {
    and_terms: Vec<TermFinder>,
    or_groups: Vec<Vec<TermFinder>>,
    phrases: Vec<TermFinder>,
    exclude_terms: Vec<TermFinder>,
}

impl SearchQueryMatcher {
    pub fn compile(query: &StructuredQuery) -> Self {
        let finders = |terms: &[String]| {
            terms
                .iter()
                .map(|term| TermFinder::new(term))
                .collect::<Vec<_>>()
        };

        Self {
            and_terms: finders(query.and_terms()),
            or_groups: query
                .or_groups()
                .iter()
                .map(|group| finders(group.as_slice()))
                .collect(),
            phrases: finders(query.phrases()),
            exclude_terms: finders(query.exclude_terms()),
        }
    }

    /// Returns true if the query has AND terms, OR groups, or phrases.
    pub fn has_positive_terms(&self) -> bool {
        !self.and_terms.is_empty() || !self.or_groups.is_empty() || !self.phrases.is_empty()
    }

    pub fn matches(&self, article: &Article) -> bool {
        // Exclusion-only and empty queries match nothing.
        if !self.has_positive_terms() {
            return false;
        }
        self.matches_text(&SearchableText::from_article(article))
    }

    fn matches_text(&self, text: &SearchableText) -> bool {
        if self.exclude_terms.iter().any(|term| term.is_found_in(text)) {
            return false;
        }
        if !self.phrases.iter().all(|phrase| phrase.is_found_in(text)) {
            return false;
        }
        if !self.and_terms.iter().all(|term| term.is_found_in(text)) {
            return false;
        }
        self.or_groups
            .iter()
            .all(|group| group.iter().any(|term| term.is_found_in(text)))
    }

    /// Filters articles, preserving input order.
    pub fn filter<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        self.filter_with_threshold(articles, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Filters articles, switching to a parallel scan once the collection
    /// reaches `parallel_threshold`. Both paths return the same order.
    pub fn filter_with_threshold<'a>(
        &self,
        articles: &'a [Article],
        parallel_threshold: usize,
    ) -> Vec<&'a Article> {
        if !self.has_positive_terms() {
            return Vec::new();
        }

        let matched = if articles.len() >= parallel_threshold.max(1) {
            articles
                .par_iter()
                .filter(|article| self.matches(article))
                .collect::<Vec<_>>()
        } else {
            articles
                .iter()
                .filter(|article| self.matches(article))
                .collect::<Vec<_>>()
        };

        log::debug!(
            "search matched {} of {} articles",
            matched.len(),
            articles.len()
        );
        matched
    }
}

/// Returns true if `article` satisfies `query`.
pub fn matches(article: &Article, query: &StructuredQuery) -> bool {
    SearchQueryMatcher::compile(query).matches(article)
}

/// Returns the articles satisfying `query`, in input order.
pub fn filter_articles<'a>(articles: &'a [Article], query: &StructuredQuery) -> Vec<&'a Article> {
    SearchQueryMatcher::compile(query).filter(articles)
}
