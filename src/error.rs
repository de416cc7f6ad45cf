use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis pipelines and their collaborators
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("image {path:?} could not be loaded: {reason}")]
    LoadFailure { path: PathBuf, reason: String },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
