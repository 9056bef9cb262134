use thiserror::Error;

/// Errors surfaced by a render call.
///
/// Entry-level problems (unknown quadrant or ring) are not errors: those
/// entries are skipped and reported through [`crate::scene::SkippedEntry`].
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("invalid radar configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse radar configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("container #{0} not found in the document")]
    MissingContainer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, RadarError>;
