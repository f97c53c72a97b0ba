//! Repopulse library crate: GitHub repository engagement analytics.
//!
//! The library crawls one repository's full issue and pull-request history
//! through the GraphQL API, exhaustively resolving every paginated
//! collection into an in-memory [`RepositoryDocument`], and computes
//! aggregate engagement metrics from the result.

pub mod cli;
pub mod config;
pub mod github;
pub mod report;

pub use config::RepopulseConfig;
pub use github::{
    CrawlSettings, GitHubExecutor, PersonalAccessToken, QueryExecutor, RepositoryCrawler,
    RepositoryDocument, RepositoryName, RepositoryOwner, RetrievalError,
};
pub use report::RepositoryReport;
