use std::error;
use std::fmt;

/// Error type for collection generation operations.
#[derive(Debug)]
pub enum CollectionGenError {
    /// Malformed host or credential spec supplied by the caller.
    ConfigError(String),

    /// Application, application version, or catalog object not found,
    /// or the catalog returned an unexpected shape.
    LookupError(String),

    /// The application version declares no consumed events. Not a failure:
    /// the run ends without writing a collection.
    EmptyResultError(String),

    /// Malformed JSON Schema for a single event. Fatal for that item only.
    SchemaError(String),

    /// Catalog HTTP request failed or returned a non-success status.
    HttpError(String),

    /// I/O error (e.g., writing the output file).
    IoError(std::io::Error),

    /// JSON parsing or serialization error.
    JsonError(serde_json::Error),
}

impl CollectionGenError {
    /// Stable process exit code for each error kind, so scripts can
    /// distinguish failure modes without parsing stderr.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyResultError(_) => 0,
            Self::ConfigError(_) => 2,
            Self::LookupError(_) => 3,
            Self::SchemaError(_) | Self::HttpError(_) | Self::IoError(_) | Self::JsonError(_) => 1,
        }
    }
}

impl error::Error for CollectionGenError {}

impl fmt::Display for CollectionGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(message) => write!(f, "invalid configuration: {message}"),
            Self::LookupError(message) => write!(f, "lookup failed: {message}"),
            Self::EmptyResultError(message) => write!(f, "{message}"),
            Self::SchemaError(message) => write!(f, "invalid schema: {message}"),
            Self::HttpError(message) => write!(f, "catalog request failed: {message}"),
            Self::IoError(io_error) => fmt::Display::fmt(io_error, f),
            Self::JsonError(json_error) => fmt::Display::fmt(json_error, f),
        }
    }
}

impl From<std::io::Error> for CollectionGenError {
    fn from(io_error: std::io::Error) -> Self {
        Self::IoError(io_error)
    }
}

impl From<serde_json::Error> for CollectionGenError {
    fn from(json_error: serde_json::Error) -> Self {
        Self::JsonError(json_error)
    }
}
