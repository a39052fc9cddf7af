//! Article records as stored in the per-user search index.
//!
//! Field names follow the persisted `search_index.json` layout, so an index
//! produced by the backend deserializes directly into `Article`.

use serde::{Deserialize, Serialize};

/// Separator used in titles to express the wiki hierarchy (`guides/react/hooks`).
pub const TITLE_PATH_SEPARATOR: char = '/';

/// A wiki article with its full content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "articleId")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_content: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: None,
            backup_content: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the body text, or an empty string for title-only articles.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Splits the title into its hierarchy segments, skipping empty ones.
    pub fn title_segments(&self) -> Vec<&str> {
        self.title
            .split(TITLE_PATH_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Returns the last hierarchy segment of the title.
    ///
    /// Titles without a usable segment (`""`, `"/"`) are returned unchanged.
    pub fn leaf_title(&self) -> &str {
        self.title
            .split(TITLE_PATH_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .next_back()
            .unwrap_or(self.title.as_str())
    }

    /// Returns true if the title places the article below a folder.
    pub fn is_nested(&self) -> bool {
        self.title_segments().len() > 1
    }
}
