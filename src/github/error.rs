//! Error types exposed by the retrieval layer.

use thiserror::Error;

/// Errors surfaced while validating input or communicating with GitHub.
///
/// Remote failures are deliberately coarse: any failed or malformed GraphQL
/// exchange is a [`RetrievalError::Transport`], with no further classification
/// into authentication, rate-limiting, or schema problems. A transport error
/// aborts the crawl that produced it; nothing is retried and no partial
/// document is surfaced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    /// The repository owner (user or organisation) was not supplied.
    #[error("repository owner is required (use --owner or -o)")]
    MissingRepositoryOwner,

    /// The repository name was not supplied.
    #[error("repository name is required (use --repo or -r)")]
    MissingRepositoryName,

    /// The authentication token was missing.
    #[error("personal access token is required (use --token or GITHUB_TOKEN)")]
    MissingToken,

    /// The configured API base URL could not be parsed.
    #[error("GitHub API base URL is invalid: {0}")]
    InvalidApiUrl(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A GraphQL exchange failed or returned malformed data.
    #[error("GitHub GraphQL request failed: {message}")]
    Transport {
        /// Transport-level or response-shape error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
