//! Search index load state.

use std::sync::Arc;

use crate::types::Article;

/// Identifies one load attempt.
///
/// Every `begin_load` and `reset` bumps the state's generation. A ticket from
/// an older generation is stale and its result is dropped, so the most
/// recently started load wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndexState {
    articles: Arc<Vec<Article>>,
    is_loaded: bool,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
}

impl SearchIndexState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &Arc<Vec<Article>> {
        &self.articles
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a load as in flight and clears the previous error.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.is_loading = true;
        self.error = None;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Stores loaded articles. Returns false if the ticket is stale.
    pub fn complete(&mut self, ticket: LoadTicket, articles: Arc<Vec<Article>>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale search index load generation={} current={}",
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.articles = articles;
        self.is_loaded = true;
        self.is_loading = false;
        self.error = None;
        true
    }

    /// Records a failed load. Previously loaded articles are kept.
    /// Returns false if the ticket is stale.
    pub fn fail(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.is_loading = false;
        self.error = Some(message.into());
        true
    }

    /// Clears the in-flight flag of a load that was dropped before it
    /// finished. Returns false if the ticket is stale.
    pub fn abandon(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.is_loading = false;
        true
    }

    /// Drops cached articles (after an article was created, edited or
    /// deleted) and invalidates any load in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.articles = Arc::default();
        self.is_loaded = false;
        self.is_loading = false;
        self.error = None;
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }
}
