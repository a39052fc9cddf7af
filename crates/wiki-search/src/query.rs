//! Query parsing, matching, and highlighting for wiki article search.
//!
//! This module provides the search box query language:
//! - `StructuredQuery`, the compiled form of a raw query (AND terms, OR groups,
//!   phrases, exclusions, highlight terms)
//! - Staged parsing of raw query strings
//! - Case-insensitive substring matching against articles
//! - Highlight segmentation for rendering results

mod expression;
mod highlight;
mod matcher;
mod parser;
mod text_match;

pub use expression::StructuredQuery;
pub use highlight::{highlight_ranges, highlight_segments, HighlightSegment};
pub use matcher::{filter_articles, matches, SearchQueryMatcher};
pub use parser::{parse_search_query, QueryParser};
pub use text_match::{SearchableText, TermFinder};
