//! CLI orchestration: configuration, crawl, and report rendering.

pub mod output;
pub mod progress;

use std::time::Instant;

use ortho_config::OrthoConfig;

use crate::config::RepopulseConfig;
use crate::github::{
    GitHubExecutor, PersonalAccessToken, RepositoryCrawler, RepositoryName, RepositoryOwner,
    RetrievalError,
};
use crate::report::RepositoryReport;

use self::progress::ConsoleProgress;

/// Runs one crawl-and-report invocation end to end.
///
/// # Errors
///
/// Returns the first [`RetrievalError`] from configuration loading, identity
/// validation, or the crawl itself. On a crawl failure the accumulated data
/// is discarded and only the error surfaces.
pub async fn run() -> Result<(), RetrievalError> {
    let config = load_config()?;

    let (owner_value, repo_value) = config.require_repository_info()?;
    let owner = RepositoryOwner::new(owner_value)?;
    let name = RepositoryName::new(repo_value)?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let settings = config.crawl_settings()?;
    let api_url = config.resolve_api_url();

    let executor = GitHubExecutor::for_token(&token, api_url.as_deref())?;
    let reporter = ConsoleProgress::start(owner.as_str(), name.as_str());
    let crawler = RepositoryCrawler::new(&executor, &reporter, settings);

    let started = Instant::now();
    let document = match crawler.crawl(&owner, &name).await {
        Ok(document) => {
            reporter.finish(document.issues.len(), document.pull_requests.len());
            document
        }
        Err(error) => {
            reporter.fail();
            return Err(error);
        }
    };

    let report = RepositoryReport::from_document(&document);
    output::write_report(&report, started.elapsed())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RetrievalError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<RepopulseConfig, RetrievalError> {
    RepopulseConfig::load().map_err(|error| RetrievalError::Configuration {
        message: error.to_string(),
    })
}
