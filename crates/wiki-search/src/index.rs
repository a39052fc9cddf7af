//! Article index loading and caching.
//!
//! The full-content article index is loaded once per session and reused by
//! every search until the caller resets it.
//!
//! ## Module Structure
//!
//! - `state` - Load state (loaded / loading / error) with stale-load detection
//! - `cache` - Shareable cache that loads from a source at most once
//! - `source` - Index sources (JSON index file, in-memory, primary-with-fallback)

mod cache;
mod source;
mod state;

pub use cache::SearchIndexCache;
pub use source::{parse_search_index, ArticleSource, FallbackSource, JsonIndexFile};
pub use state::{LoadTicket, SearchIndexState};
