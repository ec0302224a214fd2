use thiserror::Error;

pub type BlueprintResult<T> = Result<T, BlueprintError>;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A slug could not be mapped to a download location.
    #[error("Resolution error: {0}")]
    Resolution(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
