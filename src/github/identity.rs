//! Identity wrappers for repository coordinates and credentials.

use super::error::RetrievalError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingRepositoryOwner`] when the supplied
    /// string is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RetrievalError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RetrievalError::MissingRepositoryOwner);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingRepositoryName`] when the supplied
    /// string is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RetrievalError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RetrievalError::MissingRepositoryName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, RetrievalError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RetrievalError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}
