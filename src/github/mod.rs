//! GitHub GraphQL retrieval: the nested pagination and enrichment crawler.
//!
//! This module walks a repository's tree of paginated collections
//! (repository, then issues and pull requests, then their assignees, labels,
//! comments, reviews, and review threads), exhaustively resolves every page
//! via cursor continuation, and assembles a complete in-memory
//! [`RepositoryDocument`] ready for aggregation. Retrieval is fail-fast:
//! any transport error aborts the crawl with nothing surfaced.

pub mod client;
pub mod connection;
pub mod crawler;
pub(crate) mod enrich;
pub mod error;
pub mod identity;
pub mod models;
pub mod paginator;
pub(crate) mod queries;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::{GitHubExecutor, QueryExecutor};
pub use crawler::{
    CrawlSettings, NoopProgress, ProgressObserver, RepositoryCrawler, TopLevelCollection,
};
pub use error::RetrievalError;
pub use identity::{PersonalAccessToken, RepositoryName, RepositoryOwner};
pub use models::{
    Comment, Issue, ItemState, PullRequest, RepositoryDocument, RepositoryMetadata, Review,
    ReviewComment,
};

#[cfg(test)]
mod tests;
