//! GraphQL query execution capability and its Octocrab implementation.
//!
//! The crawler consumes one capability: execute a GraphQL query string and
//! return the response's `data` object. The trait-based design enables
//! mocking in tests while the Octocrab implementation handles real HTTP
//! requests. The executor is an explicitly passed dependency; no global
//! client state exists.

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::RetrievalError;
use super::identity::PersonalAccessToken;

/// Capability to execute one GraphQL query against the remote API.
///
/// One call is one network round-trip; implementations retain no state
/// between calls and perform no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes the query and returns the response's `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Transport`] when the remote call fails or
    /// the response is malformed; the error propagates to the caller
    /// unchanged, aborting the crawl that issued it.
    async fn execute(&self, query: &str) -> Result<Value, RetrievalError>;
}

/// Octocrab-backed GraphQL executor.
pub struct GitHubExecutor {
    client: Octocrab,
}

impl GitHubExecutor {
    /// Creates an executor from an existing Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated executor for the given token and optional
    /// API base URL (GitHub Enterprise deployments).
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidApiUrl`] when the base URL cannot be
    /// parsed or [`RetrievalError::Transport`] when Octocrab fails to
    /// construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: Option<&str>,
    ) -> Result<Self, RetrievalError> {
        let mut builder = Octocrab::builder().personal_token(token.as_ref());

        if let Some(api_base) = api_base {
            let base_uri: Uri = api_base
                .parse::<Uri>()
                .map_err(|error| RetrievalError::InvalidApiUrl(error.to_string()))?;
            builder = builder.base_uri(base_uri).map_err(|error| {
                RetrievalError::Transport {
                    message: format!("build client failed: {error}"),
                }
            })?;
        }

        let client = builder
            .build()
            .map_err(|error| map_octocrab_error(&error))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl QueryExecutor for GitHubExecutor {
    async fn execute(&self, query: &str) -> Result<Value, RetrievalError> {
        let payload = serde_json::json!({ "query": query });
        let body: Value = self
            .client
            .graphql(&payload)
            .await
            .map_err(|error| map_octocrab_error(&error))?;
        extract_data(body)
    }
}

/// Pulls the `data` object out of a GraphQL response body, surfacing
/// GraphQL-level errors as transport failures.
fn extract_data(mut body: Value) -> Result<Value, RetrievalError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let message = errors
            .iter()
            .filter_map(|error| error.get("message").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(RetrievalError::Transport {
            message: format!("query returned errors: {message}"),
        });
    }

    match body.get_mut("data") {
        Some(data) if !data.is_null() => Ok(data.take()),
        _ => Err(RetrievalError::Transport {
            message: "response carried no data object".to_owned(),
        }),
    }
}

/// Decodes a `data` object into a typed payload.
///
/// A shape mismatch is malformed data and therefore a transport failure.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, RetrievalError> {
    serde_json::from_value(data).map_err(|error| RetrievalError::Transport {
        message: format!("malformed response payload: {error}"),
    })
}

fn map_octocrab_error(error: &octocrab::Error) -> RetrievalError {
    let message = if let octocrab::Error::GitHub { source, .. } = error {
        format!(
            "GitHub returned {status}: {message}",
            status = source.status_code,
            message = source.message
        )
    } else {
        error.to_string()
    };
    RetrievalError::Transport { message }
}
