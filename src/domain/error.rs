//! Error types for the Reposcope plugin.
//!
//! [`ReposcopeError`] covers every failure the plugin can observe, from
//! configuration and theme loading to the upstream search call. A failed
//! search never reaches the user as an error screen: the handler logs it and
//! the renderer falls back to the empty state.

use thiserror::Error;

/// The main error type for Reposcope operations.
///
/// # Examples
///
/// ```
/// use reposcope::ReposcopeError;
///
/// let err = ReposcopeError::UpstreamStatus(401);
/// assert_eq!(err.to_string(), "GitHub API returned status 401");
/// ```
#[derive(Debug, Error)]
pub enum ReposcopeError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The upstream request could not be constructed (bad base URL).
    #[error("Invalid request URL: {0}")]
    Request(#[from] url::ParseError),

    /// The host could not deliver the request or the response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// GitHub answered with a non-2xx status code.
    #[error("GitHub API returned status {0}")]
    UpstreamStatus(u16),

    /// The response body was not a search result object.
    #[error("Malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Reposcope operations.
pub type Result<T> = std::result::Result<T, ReposcopeError>;
