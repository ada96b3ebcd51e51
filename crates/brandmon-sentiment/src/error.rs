use thiserror::Error;

/// Errors visible to callers of the sentiment pipeline.
///
/// Configuration variants are raised before any source or classifier is
/// touched. Classifier variants are propagated unchanged; the pipeline never
/// substitutes a default label.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("invalid neutral band [{lo}, {hi}]: bounds must lie in [0, 1] with lo <= hi")]
    InvalidBand { lo: f64, hi: f64 },

    #[error("limit must be a positive integer")]
    InvalidLimit,

    #[error("query must not be empty")]
    EmptyQuery,

    #[error("text to classify must not be empty")]
    EmptyText,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("invalid source configuration: {0}")]
    InvalidSourceConfig(String),

    #[error("every acquisition source failed")]
    SourcesExhausted,
}

/// Failure of a single acquisition source.
///
/// Recovered by the orchestrator, which moves on to the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Process {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("no credential configured")]
    MissingCredential,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
