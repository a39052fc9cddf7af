//! Session cache for the full-content article index.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::types::Article;

use super::source::ArticleSource;
use super::state::{LoadTicket, SearchIndexState};

/// Shareable handle to the session's article index.
///
/// Clones share the same state. The state lock is never held across an
/// await; concurrent `ensure_loaded` calls are serialized by a separate
/// async gate, so the index is fetched at most once.
#[derive(Debug, Clone, Default)]
pub struct SearchIndexCache {
    state: Arc<Mutex<SearchIndexState>>,
    load_gate: Arc<tokio::sync::Mutex<()>>,
}

impl SearchIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SearchIndexState {
        self.state.lock().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().is_loaded()
    }

    /// Drops the cached index. A load still in flight will not repopulate it.
    pub fn reset(&self) {
        self.state.lock().reset();
        log::debug!("search index cache reset");
    }

    /// Returns the cached articles, loading them from `source` on first use.
    ///
    /// A failed load records its message in the state and is returned to the
    /// caller; the next call retries.
    pub async fn ensure_loaded<S>(&self, source: &S) -> Result<Arc<Vec<Article>>>
    where
        S: ArticleSource + ?Sized,
    {
        let _gate = self.load_gate.lock().await;

        let ticket = {
            let mut state = self.state.lock();
            if state.is_loaded() {
                return Ok(state.articles().clone());
            }
            state.begin_load()
        };
        let guard = InFlightLoad {
            state: &*self.state,
            ticket: Some(ticket),
        };

        let loaded = source.load().await;
        guard.disarm();

        match loaded {
            Ok(articles) => {
                let articles = Arc::new(articles);
                let stored = self.state.lock().complete(ticket, articles.clone());
                log::info!(
                    "search index loaded from {} articles={} cached={}",
                    source.label(),
                    articles.len(),
                    stored
                );
                Ok(articles)
            }
            Err(error) => {
                self.state.lock().fail(ticket, error.to_string());
                log::warn!(
                    "search index load from {} failed: {}",
                    source.label(),
                    error
                );
                Err(error)
            }
        }
    }
}

/// Clears the in-flight flag if `ensure_loaded` is dropped mid-load.
struct InFlightLoad<'a> {
    state: &'a Mutex<SearchIndexState>,
    ticket: Option<LoadTicket>,
}

impl InFlightLoad<'_> {
    fn disarm(mut self) {
        self.ticket = None;
    }
}

impl Drop for InFlightLoad<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if self.state.lock().abandon(ticket) {
                log::debug!(
                    "search index load cancelled generation={}",
                    ticket.generation()
                );
            }
        }
    }
}
