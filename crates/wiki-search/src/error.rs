use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WikiSearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Index load error: {0}")]
    IndexLoad(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WikiSearchError>;
