//! Entity enrichment: resolving an issue's or pull request's nested
//! paginated sub-collections into complete sequences.
//!
//! Sub-collections resolve in a fixed order (assignees, then labels, then
//! comments, then reviews for pull requests), strictly sequentially; at no
//! point is more than one request in flight. Each drain starts from the
//! first page embedded in the fetched entity and follows continuation
//! cursors through node-id queries.

use serde::de::DeserializeOwned;

use super::client::{QueryExecutor, decode};
use super::connection::{Connection, Page};
use super::error::RetrievalError;
use super::models::{
    AssigneeNode, AssigneesPayload, Comment, CommentNode, CommentsPayload, Issue, IssueNode,
    LabelNode, LabelsPayload, NodeData, PullRequest, PullRequestNode, Review, ReviewComment,
    ReviewCommentNode, ReviewNode, ReviewThreadNode, ReviewThreadsPayload, ReviewsPayload,
};
use super::paginator;
use super::queries::{self, EntityKind};

/// Resolves entities' nested sub-collections through an injected executor.
pub struct EntityEnricher<'client, Executor>
where
    Executor: QueryExecutor,
{
    client: &'client Executor,
    page_size: u8,
}

impl<'client, Executor> EntityEnricher<'client, Executor>
where
    Executor: QueryExecutor,
{
    /// Creates an enricher using the given nested-collection page size.
    #[must_use]
    pub const fn new(client: &'client Executor, page_size: u8) -> Self {
        Self { client, page_size }
    }

    /// Resolves every sub-collection of a fetched issue.
    ///
    /// Consumes the partially fetched node and returns the complete issue;
    /// post-resolution, every collection field holds the order-preserving
    /// concatenation of all of its pages.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RetrievalError`] from any sub-collection
    /// fetch, abandoning the entity.
    pub async fn resolve_issue(&self, raw: IssueNode) -> Result<Issue, RetrievalError> {
        let IssueNode {
            id,
            number,
            title,
            state,
            body,
            created_at,
            updated_at,
            closed_at,
            url,
            database_id,
            locked,
            milestone,
            author,
            timeline_items,
            assignees,
            labels,
            comments,
        } = raw;

        let assignees = self.drain_assignees(&id, EntityKind::Issue, assignees).await?;
        let labels = self.drain_labels(&id, EntityKind::Issue, labels).await?;
        let comments = self.drain_comments(&id, EntityKind::Issue, comments).await?;

        let closed_by = timeline_items
            .edges
            .into_iter()
            .next_back()
            .and_then(|edge| edge.node.actor)
            .map(|actor| actor.login);

        Ok(Issue {
            id,
            number,
            title,
            state,
            body,
            author: author.map(|actor| actor.login),
            closed_by,
            locked,
            milestone: milestone.map(|milestone| milestone.title),
            created_at,
            updated_at,
            closed_at,
            url,
            database_id,
            assignees,
            labels,
            comments,
        })
    }

    /// Resolves every sub-collection of a fetched pull request, including
    /// reviews and their flattened review-thread comments.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RetrievalError`] from any sub-collection
    /// fetch, abandoning the entity.
    pub async fn resolve_pull_request(
        &self,
        raw: PullRequestNode,
    ) -> Result<PullRequest, RetrievalError> {
        let PullRequestNode {
            id,
            number,
            title,
            state,
            body,
            author_association,
            created_at,
            updated_at,
            closed_at,
            url,
            database_id,
            milestone,
            author,
            additions,
            deletions,
            changed_files,
            commits,
            base_ref,
            head_ref,
            maintainer_can_modify,
            merge_commit,
            mergeable,
            merged,
            merged_at,
            merged_by,
            review_thread_count,
            assignees,
            labels,
            comments,
            reviews,
            review_threads,
        } = raw;

        let assignees = self
            .drain_assignees(&id, EntityKind::PullRequest, assignees)
            .await?;
        let labels = self
            .drain_labels(&id, EntityKind::PullRequest, labels)
            .await?;
        let comments = self
            .drain_comments(&id, EntityKind::PullRequest, comments)
            .await?;
        let review_nodes = self.drain_reviews(&id, reviews).await?;

        // Review comments are sourced from the parent pull request's review
        // threads, not per-review threads; the upstream API offers no usable
        // per-review thread lookup. The flattened sequence attaches
        // identically to every review, and threads are only drained when a
        // review exists to receive them.
        let reviews = if review_nodes.is_empty() {
            Vec::new()
        } else {
            let thread_comments = self.drain_review_threads(&id, review_threads).await?;
            review_nodes
                .into_iter()
                .map(|node| Review::from_parts(node, thread_comments.clone()))
                .collect()
        };

        Ok(PullRequest {
            id,
            number,
            title,
            state,
            body,
            author: author.map(|actor| actor.login),
            author_association,
            milestone: milestone.map(|milestone| milestone.title),
            created_at,
            updated_at,
            closed_at,
            merged,
            merged_at,
            merged_by: merged_by.map(|actor| actor.login),
            mergeable,
            merge_commit: merge_commit.map(|commit| commit.oid),
            additions,
            deletions,
            changed_files,
            commit_count: commits.total_count,
            review_thread_count: review_thread_count.total_count,
            base_ref_id: base_ref.map(|reference| reference.id),
            head_ref_id: head_ref.map(|reference| reference.id),
            maintainer_can_modify,
            url,
            database_id,
            assignees,
            labels,
            comments,
            reviews,
        })
    }

    async fn drain_assignees(
        &self,
        id: &str,
        kind: EntityKind,
        first: Connection<AssigneeNode>,
    ) -> Result<Vec<String>, RetrievalError> {
        let nodes = paginator::drain(first.into_page(), |cursor| {
            let query = queries::assignees(id, kind, self.page_size, Some(&cursor));
            self.node_page("assignees", query, |payload: AssigneesPayload| {
                payload.assignees
            })
        })
        .await?;
        Ok(nodes.into_iter().map(|node| node.login).collect())
    }

    async fn drain_labels(
        &self,
        id: &str,
        kind: EntityKind,
        first: Connection<LabelNode>,
    ) -> Result<Vec<Option<String>>, RetrievalError> {
        let nodes = paginator::drain(first.into_page(), |cursor| {
            let query = queries::labels(id, kind, self.page_size, Some(&cursor));
            self.node_page("labels", query, |payload: LabelsPayload| payload.labels)
        })
        .await?;
        Ok(nodes.into_iter().map(|node| node.description).collect())
    }

    async fn drain_comments(
        &self,
        id: &str,
        kind: EntityKind,
        first: Connection<CommentNode>,
    ) -> Result<Vec<Comment>, RetrievalError> {
        let nodes = paginator::drain(first.into_page(), |cursor| {
            let query = queries::comments(id, kind, self.page_size, Some(&cursor));
            self.node_page("comments", query, |payload: CommentsPayload<CommentNode>| {
                payload.comments
            })
        })
        .await?;
        Ok(nodes.into_iter().map(Comment::from).collect())
    }

    async fn drain_reviews(
        &self,
        id: &str,
        first: Connection<ReviewNode>,
    ) -> Result<Vec<ReviewNode>, RetrievalError> {
        paginator::drain(first.into_page(), |cursor| {
            let query = queries::reviews(id, self.page_size, Some(&cursor));
            self.node_page("reviews", query, |payload: ReviewsPayload| payload.reviews)
        })
        .await
    }

    /// Drains the pull request's review threads and flattens every thread's
    /// own (paginated) comments into one sequence.
    async fn drain_review_threads(
        &self,
        pull_request_id: &str,
        first: Connection<ReviewThreadNode>,
    ) -> Result<Vec<ReviewComment>, RetrievalError> {
        let threads = paginator::drain(first.into_page(), |cursor| {
            let query = queries::review_threads(pull_request_id, self.page_size, Some(&cursor));
            self.node_page("review threads", query, |payload: ReviewThreadsPayload| {
                payload.review_threads
            })
        })
        .await?;

        let mut flattened = Vec::new();
        for thread in threads {
            let ReviewThreadNode { id, comments } = thread;
            let nodes = paginator::drain(comments.into_page(), |cursor| {
                let query = queries::review_comments(&id, self.page_size, Some(&cursor));
                self.node_page(
                    "review thread comments",
                    query,
                    |payload: CommentsPayload<ReviewCommentNode>| payload.comments,
                )
            })
            .await?;
            flattened.extend(nodes.into_iter().map(ReviewComment::from));
        }
        Ok(flattened)
    }

    /// Fetches and decodes one node-scoped continuation page.
    async fn node_page<P, T>(
        &self,
        operation: &'static str,
        query: String,
        project: fn(P) -> Connection<T>,
    ) -> Result<Page<T>, RetrievalError>
    where
        P: DeserializeOwned,
    {
        let data = self
            .client
            .execute(&query)
            .await
            .inspect_err(|error| tracing::error!("{operation} page fetch failed: {error}"))?;
        let envelope: NodeData<P> = decode(data)
            .inspect_err(|error| tracing::error!("{operation} page decode failed: {error}"))?;
        Ok(project(envelope.node).into_page())
    }
}
