use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WikiSearchError};

pub const CONFIG_FILENAME: &str = "wiki-search.json";

/// Collections at least this large are filtered in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

pub const ENV_INDEX_PATH: &str = "WIKI_SEARCH_INDEX";
pub const ENV_FALLBACK_INDEX_PATH: &str = "WIKI_SEARCH_FALLBACK_INDEX";
pub const ENV_PARALLEL_THRESHOLD: &str = "WIKI_SEARCH_PARALLEL_THRESHOLD";
pub const ENV_MAX_RESULTS: &str = "WIKI_SEARCH_MAX_RESULTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub index_path: Option<PathBuf>,
    pub fallback_index_path: Option<PathBuf>,
    pub parallel_threshold: usize,
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: None,
            fallback_index_path: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_results: None,
        }
    }
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|error| {
            WikiSearchError::Config(format!(
                "failed to read config {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            WikiSearchError::Config(format!(
                "failed to parse config {}: {error}",
                path.display()
            ))
        })
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = value(ENV_INDEX_PATH) {
            self.index_path = Some(PathBuf::from(path));
        }
        if let Some(path) = value(ENV_FALLBACK_INDEX_PATH) {
            self.fallback_index_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = value(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_count(ENV_PARALLEL_THRESHOLD, &raw)?;
        }
        if let Some(raw) = value(ENV_MAX_RESULTS) {
            self.max_results = Some(parse_count(ENV_MAX_RESULTS, &raw)?);
        }

        Ok(self)
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|error| {
        WikiSearchError::Config(format!("invalid {key} value {raw:?}: {error}"))
    })
}
