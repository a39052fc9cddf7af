//! Sources the full-content article index can be loaded from.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Result, WikiSearchError};
use crate::types::Article;

/// Conventional file name of a user's persisted search index.
pub const SEARCH_INDEX_FILENAME: &str = "search_index.json";

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Short description used in log lines.
    fn label(&self) -> String;

    async fn load(&self) -> Result<Vec<Article>>;
}

/// Parses a search index document: a JSON array of article records.
pub fn parse_search_index(bytes: &[u8]) -> Result<Vec<Article>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// A `search_index.json` file on disk.
#[derive(Debug, Clone)]
pub struct JsonIndexFile {
    path: PathBuf,
    missing_is_empty: bool,
}

impl JsonIndexFile {
    /// A missing file loads as an empty index, the same answer the backend
    /// gives for a user who has not written any article yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            missing_is_empty: true,
        }
    }

    /// Treats a missing file as an error, so a fallback source can take over.
    pub fn require_existing(mut self) -> Self {
        self.missing_is_empty = false;
        self
    }

    /// Resolves the index file of a user directory (`<dir>/search_index.json`).
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SEARCH_INDEX_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArticleSource for JsonIndexFile {
    fn label(&self) -> String {
        format!("index file {}", self.path.display())
    }

    async fn load(&self) -> Result<Vec<Article>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                if !self.missing_is_empty {
                    return Err(WikiSearchError::PathNotFound(self.path.clone()));
                }
                log::warn!(
                    "search index not found at {}, using empty index",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(error) => {
                return Err(WikiSearchError::IndexLoad(format!(
                    "failed to read {}: {error}",
                    self.path.display()
                )));
            }
        };

        parse_search_index(&bytes).map_err(|error| {
            WikiSearchError::IndexLoad(format!(
                "failed to parse {}: {error}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl ArticleSource for Vec<Article> {
    fn label(&self) -> String {
        format!("in-memory index ({} articles)", self.len())
    }

    async fn load(&self) -> Result<Vec<Article>> {
        Ok(self.clone())
    }
}

/// Loads from `primary`, falling back to `fallback` when it fails.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSource<P, F>
where
    P: ArticleSource,
    F: ArticleSource,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> ArticleSource for FallbackSource<P, F>
where
    P: ArticleSource,
    F: ArticleSource,
{
    fn label(&self) -> String {
        format!("{} (fallback: {})", self.primary.label(), self.fallback.label())
    }

    async fn load(&self) -> Result<Vec<Article>> {
        match self.primary.load().await {
            Ok(articles) => Ok(articles),
            Err(error) => {
                log::warn!(
                    "failed to load {}, falling back to {}: {}",
                    self.primary.label(),
                    self.fallback.label(),
                    error
                );
                self.fallback.load().await
            }
        }
    }
}
