//! Top-level repository walk: metadata, topics, and the issue and
//! pull-request collections.
//!
//! The crawler drives the entity enricher across every page of each
//! top-level collection, enriching all entities of a page before requesting
//! the next. All fetching is strictly sequential; the only throttling
//! mechanism is that at most one request is ever in flight. Any fetch
//! failure aborts the whole crawl; no partial document is returned.

use super::client::{QueryExecutor, decode};
use super::connection::{Connection, Page};
use super::enrich::EntityEnricher;
use super::error::RetrievalError;
use super::identity::{RepositoryName, RepositoryOwner};
use super::models::{
    Issue, IssuesPage, PullRequest, PullRequestsPage, RepositoryData, RepositoryDocument,
    RepositoryNode, TopicEdgeNode, TopicsPage,
};
use super::paginator;
use super::queries;

/// Top-level collection being walked, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelCollection {
    /// The repository's issues.
    Issues,
    /// The repository's pull requests.
    PullRequests,
}

impl TopLevelCollection {
    /// Human-readable label for progress messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::PullRequests => "pull requests",
        }
    }
}

/// Observer notified as the crawl advances.
///
/// Invoked after each fully enriched page of a top-level collection with a
/// monotonically non-decreasing processed count that reaches the total
/// exactly when the collection completes. Presentation belongs to the
/// caller; the crawler only reports counts.
pub trait ProgressObserver: Send + Sync {
    /// A top-level collection walk is starting.
    fn collection_started(&self, collection: TopLevelCollection, total: u64);

    /// A page of the collection has been fully enriched.
    fn page_completed(&self, collection: TopLevelCollection, processed: u64, total: u64);
}

/// Observer that drops all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn collection_started(&self, _collection: TopLevelCollection, _total: u64) {}

    fn page_completed(&self, _collection: TopLevelCollection, _processed: u64, _total: u64) {}
}

/// Page sizes for the crawl.
///
/// Top-level collections (issues, pull requests, topics) and nested
/// sub-collections are sized independently; smaller nested pages bound the
/// fan-out cost of entities with many sub-resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Page size for top-level collections.
    pub page_size: u8,
    /// Page size for nested sub-collections.
    pub nested_page_size: u8,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            nested_page_size: 50,
        }
    }
}

/// Walks one repository and assembles the complete in-memory document.
pub struct RepositoryCrawler<'client, Executor, Observer>
where
    Executor: QueryExecutor,
    Observer: ProgressObserver,
{
    client: &'client Executor,
    observer: &'client Observer,
    enricher: EntityEnricher<'client, Executor>,
    settings: CrawlSettings,
}

impl<'client, Executor, Observer> RepositoryCrawler<'client, Executor, Observer>
where
    Executor: QueryExecutor,
    Observer: ProgressObserver,
{
    /// Creates a crawler over the given executor and progress observer.
    #[must_use]
    pub const fn new(
        client: &'client Executor,
        observer: &'client Observer,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            client,
            observer,
            enricher: EntityEnricher::new(client, settings.nested_page_size),
            settings,
        }
    }

    /// Crawls the repository to completion.
    ///
    /// Fetches repository metadata and topics, then exhaustively walks and
    /// enriches the issue and pull-request collections in that order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RetrievalError`] from any fetch; the
    /// accumulated partial document is discarded.
    pub async fn crawl(
        &self,
        owner: &RepositoryOwner,
        name: &RepositoryName,
    ) -> Result<RepositoryDocument, RetrievalError> {
        let repository = self.fetch_repository(owner, name).await?;
        let (metadata, first_topics) = repository.into_parts();

        let topics = self.drain_topics(owner, name, first_topics).await?;
        let issues = self.crawl_issues(owner, name, metadata.total_issues).await?;
        let pull_requests = self
            .crawl_pull_requests(owner, name, metadata.total_pull_requests)
            .await?;

        Ok(RepositoryDocument {
            metadata,
            topics,
            issues,
            pull_requests,
        })
    }

    async fn fetch_repository(
        &self,
        owner: &RepositoryOwner,
        name: &RepositoryName,
    ) -> Result<RepositoryNode, RetrievalError> {
        let query = queries::repository(owner.as_str(), name.as_str(), self.settings.page_size);
        let data = self
            .client
            .execute(&query)
            .await
            .inspect_err(|error| tracing::error!("repository metadata fetch failed: {error}"))?;
        let payload: RepositoryData<RepositoryNode> = decode(data)
            .inspect_err(|error| tracing::error!("repository metadata decode failed: {error}"))?;
        Ok(payload.repository)
    }

    async fn drain_topics(
        &self,
        owner: &RepositoryOwner,
        name: &RepositoryName,
        first: Connection<TopicEdgeNode>,
    ) -> Result<Vec<String>, RetrievalError> {
        let edges = paginator::drain(first.into_page(), |cursor| async move {
            let query = queries::topics(
                owner.as_str(),
                name.as_str(),
                self.settings.page_size,
                Some(&cursor),
            );
            let data = self
                .client
                .execute(&query)
                .await
                .inspect_err(|error| tracing::error!("topics page fetch failed: {error}"))?;
            let payload: RepositoryData<TopicsPage> = decode(data)
                .inspect_err(|error| tracing::error!("topics page decode failed: {error}"))?;
            Ok(payload.repository.repository_topics.into_page())
        })
        .await?;

        Ok(edges.into_iter().map(|edge| edge.topic.name).collect())
    }

    async fn crawl_issues(
        &self,
        owner: &RepositoryOwner,
        name: &RepositoryName,
        total: u64,
    ) -> Result<Vec<Issue>, RetrievalError> {
        self.observer
            .collection_started(TopLevelCollection::Issues, total);

        let mut issues = Vec::new();
        let mut processed: u64 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let query = queries::issues(
                owner.as_str(),
                name.as_str(),
                self.settings.page_size,
                self.settings.nested_page_size,
                cursor.as_deref(),
            );
            let data = self
                .client
                .execute(&query)
                .await
                .inspect_err(|error| tracing::error!("issues page fetch failed: {error}"))?;
            let payload: RepositoryData<IssuesPage> = decode(data)
                .inspect_err(|error| tracing::error!("issues page decode failed: {error}"))?;

            let Page {
                items,
                next_cursor,
                has_more,
            } = payload.repository.issues.into_page();

            for raw in items {
                issues.push(self.enricher.resolve_issue(raw).await?);
                processed += 1;
            }
            self.observer
                .page_completed(TopLevelCollection::Issues, processed, total);

            if !has_more {
                break;
            }
            cursor = Some(next_cursor.ok_or_else(paginator::missing_cursor)?);
        }

        Ok(issues)
    }

    async fn crawl_pull_requests(
        &self,
        owner: &RepositoryOwner,
        name: &RepositoryName,
        total: u64,
    ) -> Result<Vec<PullRequest>, RetrievalError> {
        self.observer
            .collection_started(TopLevelCollection::PullRequests, total);

        let mut pull_requests = Vec::new();
        let mut processed: u64 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let query = queries::pull_requests(
                owner.as_str(),
                name.as_str(),
                self.settings.page_size,
                self.settings.nested_page_size,
                cursor.as_deref(),
            );
            let data = self
                .client
                .execute(&query)
                .await
                .inspect_err(|error| tracing::error!("pull requests page fetch failed: {error}"))?;
            let payload: RepositoryData<PullRequestsPage> = decode(data).inspect_err(|error| {
                tracing::error!("pull requests page decode failed: {error}");
            })?;

            let Page {
                items,
                next_cursor,
                has_more,
            } = payload.repository.pull_requests.into_page();

            for raw in items {
                pull_requests.push(self.enricher.resolve_pull_request(raw).await?);
                processed += 1;
            }
            self.observer
                .page_completed(TopLevelCollection::PullRequests, processed, total);

            if !has_more {
                break;
            }
            cursor = Some(next_cursor.ok_or_else(paginator::missing_cursor)?);
        }

        Ok(pull_requests)
    }
}
