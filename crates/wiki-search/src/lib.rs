//! Client-side full-text search for a personal Markdown wiki.
//!
//! This crate provides the search subsystem of the wiki client:
//! - Query parsing (AND, OR, phrases, exclusions, parenthesized groups)
//! - Case-insensitive matching and filtering over the article index
//! - Highlight segmentation for rendering results
//! - Session caching of the full-content article index

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod types;

// Re-export main types
pub use config::SearchConfig;
pub use error::{Result, WikiSearchError};
pub use index::{ArticleSource, FallbackSource, JsonIndexFile, SearchIndexCache, SearchIndexState};
pub use query::{
    filter_articles, highlight_segments, matches, parse_search_query, HighlightSegment,
    QueryParser, SearchQueryMatcher, StructuredQuery,
};
pub use search::{search, search_with_config, SearchOutcome};
pub use types::Article;
