use thiserror::Error;

/// Errors that abort a whole pipeline run.
///
/// Problems scoped to a single entry (bad timestamps, malformed coordinates)
/// never surface here; they are logged and counted in
/// [`SkipStats`](crate::SkipStats).
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to read location history {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in location history {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("location history {path} must be a JSON array of entries, found {found}")]
    NotAnArray { path: String, found: &'static str },

    #[error("invalid boundary date \"{value}\" (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
