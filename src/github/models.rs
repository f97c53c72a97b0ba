//! Data models for the crawl: raw GraphQL nodes and resolved domain types.
//!
//! Raw `*Node` structs mirror the wire shape of the queries in
//! [`super::queries`], with sub-collections still carrying pagination
//! metadata. The enricher drains those connections and assembles the public
//! domain types, whose collection fields are plain, fully resolved
//! sequences with no residual cursor state.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::connection::{Connection, ConnectionTotal, EdgeList};

// --- Wire envelopes ---

/// Envelope for repository-scoped query responses.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryData<T> {
    pub(crate) repository: T,
}

/// Envelope for node-scoped continuation responses.
#[derive(Debug, Deserialize)]
pub(crate) struct NodeData<T> {
    pub(crate) node: T,
}

/// `repository { issues }` payload of an issues page.
#[derive(Debug, Deserialize)]
pub(crate) struct IssuesPage {
    pub(crate) issues: Connection<IssueNode>,
}

/// `repository { pullRequests }` payload of a pull-requests page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestsPage {
    pub(crate) pull_requests: Connection<PullRequestNode>,
}

/// `repository { repositoryTopics }` payload of a topics page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopicsPage {
    pub(crate) repository_topics: Connection<TopicEdgeNode>,
}

/// `node { assignees }` continuation payload.
#[derive(Debug, Deserialize)]
pub(crate) struct AssigneesPayload {
    pub(crate) assignees: Connection<AssigneeNode>,
}

/// `node { labels }` continuation payload.
#[derive(Debug, Deserialize)]
pub(crate) struct LabelsPayload {
    pub(crate) labels: Connection<LabelNode>,
}

/// `node { comments }` continuation payload (issues, PRs, and threads).
#[derive(Debug, Deserialize)]
pub(crate) struct CommentsPayload<T> {
    pub(crate) comments: Connection<T>,
}

/// `node { reviews }` continuation payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ReviewsPayload {
    pub(crate) reviews: Connection<ReviewNode>,
}

/// `node { reviewThreads }` continuation payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewThreadsPayload {
    pub(crate) review_threads: Connection<ReviewThreadNode>,
}

// --- Raw nodes ---

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ActorNode {
    pub(crate) login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct NamedNode {
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct MilestoneNode {
    pub(crate) title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CommitOidNode {
    pub(crate) oid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct RefIdNode {
    pub(crate) id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct AssigneeNode {
    pub(crate) login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct LabelNode {
    pub(crate) description: Option<String>,
}

/// `repositoryTopics` edge node: `{ topic { name } }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct TopicEdgeNode {
    pub(crate) topic: NamedNode,
}

/// The `... on ClosedEvent` node of an issue's closing timeline item.
///
/// The inline fragment yields an empty object for other event types, so the
/// actor is modelled as fully optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ClosedEventNode {
    #[serde(default)]
    pub(crate) actor: Option<ActorNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentNode {
    pub(crate) id: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) author_association: String,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) author: Option<ActorNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewNode {
    pub(crate) id: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) body: String,
    pub(crate) url: String,
    pub(crate) state: String,
    pub(crate) submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) author: Option<ActorNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewCommentNode {
    pub(crate) id: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) author_association: String,
    pub(crate) body: String,
    pub(crate) commit: Option<CommitOidNode>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) diff_hunk: String,
    pub(crate) url: String,
    pub(crate) original_commit: Option<CommitOidNode>,
    pub(crate) original_position: Option<u64>,
    pub(crate) path: String,
    pub(crate) position: Option<u64>,
    pub(crate) updated_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) author: Option<ActorNode>,
}

/// Review thread with the first page of its comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ReviewThreadNode {
    pub(crate) id: String,
    pub(crate) comments: Connection<ReviewCommentNode>,
}

/// Issue as fetched: scalar fields plus partially fetched sub-collections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueNode {
    pub(crate) id: String,
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) state: ItemState,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub(crate) url: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) locked: bool,
    pub(crate) milestone: Option<MilestoneNode>,
    #[serde(default)]
    pub(crate) author: Option<ActorNode>,
    pub(crate) timeline_items: EdgeList<ClosedEventNode>,
    pub(crate) assignees: Connection<AssigneeNode>,
    pub(crate) labels: Connection<LabelNode>,
    pub(crate) comments: Connection<CommentNode>,
}

/// Pull request as fetched: scalar fields plus partially fetched
/// sub-collections, including the review-thread connection used to source
/// review comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestNode {
    pub(crate) id: String,
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) state: ItemState,
    pub(crate) body: String,
    pub(crate) author_association: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub(crate) url: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) milestone: Option<MilestoneNode>,
    #[serde(default)]
    pub(crate) author: Option<ActorNode>,
    pub(crate) additions: u64,
    pub(crate) deletions: u64,
    pub(crate) changed_files: u64,
    pub(crate) commits: ConnectionTotal,
    pub(crate) base_ref: Option<RefIdNode>,
    pub(crate) head_ref: Option<RefIdNode>,
    pub(crate) maintainer_can_modify: bool,
    pub(crate) merge_commit: Option<CommitOidNode>,
    pub(crate) mergeable: String,
    pub(crate) merged: bool,
    pub(crate) merged_at: Option<DateTime<Utc>>,
    pub(crate) merged_by: Option<ActorNode>,
    pub(crate) review_thread_count: ConnectionTotal,
    pub(crate) assignees: Connection<AssigneeNode>,
    pub(crate) labels: Connection<LabelNode>,
    pub(crate) comments: Connection<CommentNode>,
    pub(crate) reviews: Connection<ReviewNode>,
    pub(crate) review_threads: Connection<ReviewThreadNode>,
}

/// Repository root as fetched by the metadata query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryNode {
    pub(crate) id: String,
    pub(crate) database_id: Option<u64>,
    pub(crate) name: String,
    pub(crate) name_with_owner: String,
    pub(crate) owner: ActorNode,
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    pub(crate) ssh_url: String,
    pub(crate) homepage_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) pushed_at: Option<DateTime<Utc>>,
    pub(crate) primary_language: Option<NamedNode>,
    pub(crate) default_branch_ref: Option<NamedNode>,
    pub(crate) is_archived: bool,
    pub(crate) is_disabled: bool,
    pub(crate) is_fork: bool,
    pub(crate) is_private: bool,
    pub(crate) has_issues_enabled: bool,
    pub(crate) has_wiki_enabled: bool,
    pub(crate) merge_commit_allowed: bool,
    pub(crate) rebase_merge_allowed: bool,
    pub(crate) squash_merge_allowed: bool,
    pub(crate) fork_count: u64,
    pub(crate) stargazers: ConnectionTotal,
    pub(crate) watchers: ConnectionTotal,
    pub(crate) open_issues: ConnectionTotal,
    pub(crate) issues: ConnectionTotal,
    pub(crate) open_pull_requests: ConnectionTotal,
    pub(crate) pull_requests: ConnectionTotal,
    pub(crate) repository_topics: Connection<TopicEdgeNode>,
}

impl RepositoryNode {
    /// Splits the node into resolved metadata and the prefetched first page
    /// of topics.
    pub(crate) fn into_parts(self) -> (RepositoryMetadata, Connection<TopicEdgeNode>) {
        let metadata = RepositoryMetadata {
            id: self.id,
            database_id: self.database_id,
            name: self.name,
            name_with_owner: self.name_with_owner,
            owner: self.owner.login,
            description: self.description,
            url: self.url,
            ssh_url: self.ssh_url,
            homepage_url: self.homepage_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            pushed_at: self.pushed_at,
            primary_language: self.primary_language.map(|language| language.name),
            default_branch: self.default_branch_ref.map(|branch| branch.name),
            is_archived: self.is_archived,
            is_disabled: self.is_disabled,
            is_fork: self.is_fork,
            is_private: self.is_private,
            has_issues_enabled: self.has_issues_enabled,
            has_wiki_enabled: self.has_wiki_enabled,
            merge_commit_allowed: self.merge_commit_allowed,
            rebase_merge_allowed: self.rebase_merge_allowed,
            squash_merge_allowed: self.squash_merge_allowed,
            fork_count: self.fork_count,
            stargazer_count: self.stargazers.total_count,
            watcher_count: self.watchers.total_count,
            open_issues: self.open_issues.total_count,
            total_issues: self.issues.total_count,
            open_pull_requests: self.open_pull_requests.total_count,
            total_pull_requests: self.pull_requests.total_count,
        };
        (metadata, self.repository_topics)
    }
}

// --- Resolved domain types ---

/// State of an issue or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    /// Still open.
    Open,
    /// Closed without merging.
    Closed,
    /// Merged (pull requests only).
    Merged,
}

/// A discussion comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Node id.
    pub id: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Author login; absent for deleted accounts.
    pub author: Option<String>,
    /// Author's association with the repository (e.g. `MEMBER`).
    pub author_association: String,
    /// Comment body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// HTML URL.
    pub url: String,
}

impl From<CommentNode> for Comment {
    fn from(node: CommentNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            author: node.author.map(|actor| actor.login),
            author_association: node.author_association,
            body: node.body,
            created_at: node.created_at,
            updated_at: node.updated_at,
            url: node.url,
        }
    }
}

/// A code-level comment inside a pull request review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// Node id.
    pub id: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Author login; absent for deleted accounts.
    pub author: Option<String>,
    /// Author's association with the repository.
    pub author_association: String,
    /// Comment body.
    pub body: String,
    /// File path the comment is anchored to.
    pub path: String,
    /// Position in the current diff, when still resolvable.
    pub position: Option<u64>,
    /// Position in the original diff.
    pub original_position: Option<u64>,
    /// The surrounding diff hunk.
    pub diff_hunk: String,
    /// Commit the comment currently attaches to.
    pub commit: Option<String>,
    /// Commit the comment was originally made on.
    pub original_commit: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// HTML URL.
    pub url: String,
}

impl From<ReviewCommentNode> for ReviewComment {
    fn from(node: ReviewCommentNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            author: node.author.map(|actor| actor.login),
            author_association: node.author_association,
            body: node.body,
            path: node.path,
            position: node.position,
            original_position: node.original_position,
            diff_hunk: node.diff_hunk,
            commit: node.commit.map(|commit| commit.oid),
            original_commit: node.original_commit.map(|commit| commit.oid),
            created_at: node.created_at,
            updated_at: node.updated_at,
            url: node.url,
        }
    }
}

/// A pull request review with its attached review comments.
///
/// The comments are the flattened review-thread comments of the parent pull
/// request, identical across every review of that pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Node id.
    pub id: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Author login; absent for deleted accounts.
    pub author: Option<String>,
    /// Review body.
    pub body: String,
    /// Review state as reported by the API (e.g. `APPROVED`).
    pub state: String,
    /// Submission timestamp; absent for pending reviews.
    pub submitted_at: Option<DateTime<Utc>>,
    /// HTML URL.
    pub url: String,
    /// Flattened review-thread comments of the parent pull request.
    pub comments: Vec<ReviewComment>,
}

impl Review {
    pub(crate) fn from_parts(node: ReviewNode, comments: Vec<ReviewComment>) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            author: node.author.map(|actor| actor.login),
            body: node.body,
            state: node.state,
            submitted_at: node.submitted_at,
            url: node.url,
            comments,
        }
    }
}

/// A fully enriched issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Node id.
    pub id: String,
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Open or closed.
    pub state: ItemState,
    /// Issue body.
    pub body: String,
    /// Author login; absent for deleted accounts.
    pub author: Option<String>,
    /// Login of the actor who last closed the issue, when recorded.
    pub closed_by: Option<String>,
    /// Whether the conversation is locked.
    pub locked: bool,
    /// Milestone title, if assigned.
    pub milestone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Closing timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// HTML URL.
    pub url: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Assignee logins, fully resolved.
    pub assignees: Vec<String>,
    /// Label descriptions, fully resolved; a label without a description
    /// contributes `None` so label counts survive.
    pub labels: Vec<Option<String>>,
    /// Discussion comments, fully resolved.
    pub comments: Vec<Comment>,
}

/// A fully enriched pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Node id.
    pub id: String,
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Open, closed, or merged.
    pub state: ItemState,
    /// Pull request body.
    pub body: String,
    /// Author login; absent for deleted accounts.
    pub author: Option<String>,
    /// Author's association with the repository.
    pub author_association: String,
    /// Milestone title, if assigned.
    pub milestone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Closing timestamp, if closed or merged.
    pub closed_at: Option<DateTime<Utc>>,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// Merge timestamp, if merged.
    pub merged_at: Option<DateTime<Utc>>,
    /// Login of the merging actor, if merged.
    pub merged_by: Option<String>,
    /// Mergeability as reported by the API (e.g. `MERGEABLE`).
    pub mergeable: String,
    /// Merge commit oid, if merged.
    pub merge_commit: Option<String>,
    /// Added line count.
    pub additions: u64,
    /// Deleted line count.
    pub deletions: u64,
    /// Number of changed files.
    pub changed_files: u64,
    /// Number of commits on the pull request.
    pub commit_count: u64,
    /// Total number of review threads.
    pub review_thread_count: u64,
    /// Base ref node id, when the ref still exists.
    pub base_ref_id: Option<String>,
    /// Head ref node id, when the ref still exists.
    pub head_ref_id: Option<String>,
    /// Whether maintainers may push to the head branch.
    pub maintainer_can_modify: bool,
    /// HTML URL.
    pub url: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Assignee logins, fully resolved.
    pub assignees: Vec<String>,
    /// Label descriptions, fully resolved; `None` entries are labels
    /// without a description.
    pub labels: Vec<Option<String>>,
    /// Discussion comments, fully resolved.
    pub comments: Vec<Comment>,
    /// Reviews with flattened review-thread comments, fully resolved.
    pub reviews: Vec<Review>,
}

/// Resolved repository metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Node id.
    pub id: String,
    /// Numeric database id, if exposed.
    pub database_id: Option<u64>,
    /// Repository name.
    pub name: String,
    /// `owner/name` form.
    pub name_with_owner: String,
    /// Owner login.
    pub owner: String,
    /// Repository description.
    pub description: Option<String>,
    /// HTML URL.
    pub url: String,
    /// SSH clone URL.
    pub ssh_url: String,
    /// Homepage URL, if set.
    pub homepage_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Last-push timestamp, if any.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Primary language name, if detected.
    pub primary_language: Option<String>,
    /// Default branch name, if any.
    pub default_branch: Option<String>,
    /// Whether the repository is archived.
    pub is_archived: bool,
    /// Whether the repository is disabled.
    pub is_disabled: bool,
    /// Whether the repository is a fork.
    pub is_fork: bool,
    /// Whether the repository is private.
    pub is_private: bool,
    /// Whether issues are enabled.
    pub has_issues_enabled: bool,
    /// Whether the wiki is enabled.
    pub has_wiki_enabled: bool,
    /// Whether merge commits are allowed.
    pub merge_commit_allowed: bool,
    /// Whether rebase merges are allowed.
    pub rebase_merge_allowed: bool,
    /// Whether squash merges are allowed.
    pub squash_merge_allowed: bool,
    /// Fork count.
    pub fork_count: u64,
    /// Stargazer count.
    pub stargazer_count: u64,
    /// Watcher count.
    pub watcher_count: u64,
    /// Open issue count at crawl time.
    pub open_issues: u64,
    /// Total issue count at crawl time.
    pub total_issues: u64,
    /// Open pull-request count at crawl time.
    pub open_pull_requests: u64,
    /// Total pull-request count at crawl time.
    pub total_pull_requests: u64,
}

/// The complete in-memory result of one crawl.
///
/// Created once repository metadata resolves, populated as each top-level
/// collection completes, and handed to the aggregation layer when both
/// issues and pull requests are fully enriched. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDocument {
    /// Resolved repository metadata.
    pub metadata: RepositoryMetadata,
    /// Repository topics, fully resolved.
    pub topics: Vec<String>,
    /// All issues, fully enriched.
    pub issues: Vec<Issue>,
    /// All pull requests, fully enriched.
    pub pull_requests: Vec<PullRequest>,
}
