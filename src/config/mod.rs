//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.repopulse.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPOPULSE_OWNER`, `REPOPULSE_REPO`,
//!    `REPOPULSE_TOKEN` (or legacy `GITHUB_TOKEN`), `REPOPULSE_API_URL`
//!    (or legacy `GITHUB_URL`)
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`,
//!    `--token`/`-t`, `--api-url`, `--page-size`, `--nested-page-size`

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::crawler::CrawlSettings;
use crate::github::error::RetrievalError;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `REPOPULSE_OWNER` or `--owner`: Repository owner (user or organisation)
/// - `REPOPULSE_REPO` or `--repo`: Repository name
/// - `REPOPULSE_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `REPOPULSE_API_URL`, `GITHUB_URL`, or `--api-url`: GraphQL API base URL
///   for GitHub Enterprise deployments
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPOPULSE",
    discovery(
        dotfile_name = ".repopulse.toml",
        config_file_name = "repopulse.toml",
        app_name = "repopulse"
    )
)]
pub struct RepopulseConfig {
    /// Repository owner (e.g., "octocat").
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `REPOPULSE_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `REPOPULSE_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPOPULSE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Base URL of the GitHub API for Enterprise deployments.
    ///
    /// When unset, requests go to the public `api.github.com`.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>`
    /// - Environment: `REPOPULSE_API_URL` or `GITHUB_URL` (legacy)
    /// - Config file: `api_url = "..."`
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Page size for top-level collections (issues, pull requests, topics).
    ///
    /// Must be between 1 and 100 (the GraphQL API maximum).
    ///
    /// Can be provided via:
    /// - CLI: `--page-size <N>`
    /// - Environment: `REPOPULSE_PAGE_SIZE`
    /// - Config file: `page_size = 50`
    #[ortho_config()]
    pub page_size: u8,

    /// Page size for nested sub-collections (assignees, labels, comments,
    /// reviews, review threads).
    ///
    /// Must be between 1 and 100. Smaller values bound the fan-out cost of
    /// entities with many sub-resources.
    ///
    /// Can be provided via:
    /// - CLI: `--nested-page-size <N>`
    /// - Environment: `REPOPULSE_NESTED_PAGE_SIZE`
    /// - Config file: `nested_page_size = 50`
    #[ortho_config()]
    pub nested_page_size: u8,
}

const DEFAULT_PAGE_SIZE: u8 = 50;
const MAX_PAGE_SIZE: u8 = 100;

impl Default for RepopulseConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            token: None,
            api_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            nested_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RepopulseConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// For backward compatibility, if no token is provided via
    /// `REPOPULSE_TOKEN`, the CLI, or a configuration file, this method
    /// falls back to reading `GITHUB_TOKEN` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingToken`] when no token source
    /// provides a value.
    pub fn resolve_token(&self) -> Result<String, RetrievalError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(RetrievalError::MissingToken)
    }

    /// Resolves the API base URL from configuration or the legacy
    /// `GITHUB_URL` environment variable, if either is set.
    #[must_use]
    pub fn resolve_api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| env::var("GITHUB_URL").ok())
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingRepositoryOwner`] or
    /// [`RetrievalError::MissingRepositoryName`] when either is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), RetrievalError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(RetrievalError::MissingRepositoryOwner),
            (_, None) => Err(RetrievalError::MissingRepositoryName),
        }
    }

    /// Validates the configured page sizes and returns crawl settings.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Configuration`] when either page size is
    /// zero or exceeds the GraphQL API maximum of 100.
    pub fn crawl_settings(&self) -> Result<CrawlSettings, RetrievalError> {
        validate_page_size("page_size", self.page_size)?;
        validate_page_size("nested_page_size", self.nested_page_size)?;
        Ok(CrawlSettings {
            page_size: self.page_size,
            nested_page_size: self.nested_page_size,
        })
    }
}

fn validate_page_size(field: &str, value: u8) -> Result<(), RetrievalError> {
    if value == 0 {
        return Err(RetrievalError::Configuration {
            message: format!("{field} must be at least 1"),
        });
    }
    if value > MAX_PAGE_SIZE {
        return Err(RetrievalError::Configuration {
            message: format!("{field} must not exceed {MAX_PAGE_SIZE}"),
        });
    }
    Ok(())
}
