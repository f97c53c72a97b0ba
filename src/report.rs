//! Engagement statistics computed from a fully crawled repository document.
//!
//! The consumer of the crawl: counts, time-to-close/merge means, and
//! comment/review density. The document is read once and discarded; nothing
//! here issues requests or persists state.

use std::fmt;
use std::time::Duration;

use crate::github::models::{Issue, ItemState, PullRequest, RepositoryDocument};

/// Aggregated engagement metrics for one repository.
///
/// Means are absent when the contributing set is empty (for example the
/// mean time to close of a repository with no closed issues).
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryReport {
    /// Repository display name (`owner/name`).
    pub name_with_owner: String,
    /// Stargazer count.
    pub stargazers: u64,
    /// Fork count.
    pub forks: u64,
    /// Watcher count.
    pub watchers: u64,
    /// Topics attached to the repository.
    pub topics: Vec<String>,
    /// Number of issues retrieved.
    pub issue_count: usize,
    /// Number of open issues retrieved.
    pub open_issues: usize,
    /// Number of closed issues retrieved.
    pub closed_issues: usize,
    /// Mean time from creation to closing over closed issues.
    pub mean_time_to_close: Option<Duration>,
    /// Mean discussion comments per issue.
    pub mean_comments_per_issue: Option<f64>,
    /// Number of pull requests retrieved.
    pub pull_request_count: usize,
    /// Number of open pull requests retrieved.
    pub open_pull_requests: usize,
    /// Number of closed (unmerged) pull requests retrieved.
    pub closed_pull_requests: usize,
    /// Number of merged pull requests retrieved.
    pub merged_pull_requests: usize,
    /// Mean time from creation to merging over merged pull requests.
    pub mean_time_to_merge: Option<Duration>,
    /// Mean discussion comments per pull request.
    pub mean_comments_per_pull_request: Option<f64>,
    /// Mean discussion comments per closed-or-merged pull request.
    pub mean_comments_per_settled: Option<f64>,
    /// Mean reviews per closed-or-merged pull request.
    pub mean_reviews_per_settled: Option<f64>,
    /// Mean interactions (comments, reviews, and review comments) per
    /// closed-or-merged pull request.
    pub mean_interactions_per_settled: Option<f64>,
}

impl RepositoryReport {
    /// Computes the report from a complete document.
    #[must_use]
    pub fn from_document(document: &RepositoryDocument) -> Self {
        let issues = &document.issues;
        let pull_requests = &document.pull_requests;

        let open_issues = count_state(issues.iter().map(|issue| issue.state), ItemState::Open);
        let merged = count_state(
            pull_requests.iter().map(|pull| pull.state),
            ItemState::Merged,
        );
        let closed = count_state(
            pull_requests.iter().map(|pull| pull.state),
            ItemState::Closed,
        );
        let open = count_state(pull_requests.iter().map(|pull| pull.state), ItemState::Open);

        let settled: Vec<&PullRequest> = pull_requests
            .iter()
            .filter(|pull| matches!(pull.state, ItemState::Closed | ItemState::Merged))
            .collect();

        Self {
            name_with_owner: document.metadata.name_with_owner.clone(),
            stargazers: document.metadata.stargazer_count,
            forks: document.metadata.fork_count,
            watchers: document.metadata.watcher_count,
            topics: document.topics.clone(),
            issue_count: issues.len(),
            open_issues,
            closed_issues: issues.len().saturating_sub(open_issues),
            mean_time_to_close: mean_duration(
                issues
                    .iter()
                    .filter(|issue| issue.state == ItemState::Closed)
                    .filter_map(issue_close_millis),
            ),
            mean_comments_per_issue: mean(issues.iter().map(|issue| issue.comments.len())),
            pull_request_count: pull_requests.len(),
            open_pull_requests: open,
            closed_pull_requests: closed,
            merged_pull_requests: merged,
            mean_time_to_merge: mean_duration(
                pull_requests
                    .iter()
                    .filter(|pull| pull.state == ItemState::Merged)
                    .filter_map(pull_merge_millis),
            ),
            mean_comments_per_pull_request: mean(
                pull_requests.iter().map(|pull| pull.comments.len()),
            ),
            mean_comments_per_settled: mean(settled.iter().map(|pull| pull.comments.len())),
            mean_reviews_per_settled: mean(settled.iter().map(|pull| pull.reviews.len())),
            mean_interactions_per_settled: mean(settled.iter().copied().map(interactions)),
        }
    }
}

fn count_state(states: impl Iterator<Item = ItemState>, wanted: ItemState) -> usize {
    states.filter(|state| *state == wanted).count()
}

fn issue_close_millis(issue: &Issue) -> Option<i64> {
    issue
        .closed_at
        .map(|closed_at| (closed_at - issue.created_at).num_milliseconds())
}

fn pull_merge_millis(pull: &PullRequest) -> Option<i64> {
    pull.merged_at
        .map(|merged_at| (merged_at - pull.created_at).num_milliseconds())
}

/// Interactions on a pull request: discussion comments, reviews, and each
/// review's attached review comments.
fn interactions(pull: &PullRequest) -> usize {
    let review_comments: usize = pull.reviews.iter().map(|review| review.comments.len()).sum();
    pull.comments.len() + pull.reviews.len() + review_comments
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "engagement means are approximate summary statistics"
)]
fn mean(values: impl Iterator<Item = usize>) -> Option<f64> {
    let mut count: usize = 0;
    let mut sum: usize = 0;
    for value in values {
        count += 1;
        sum += value;
    }
    (count > 0).then(|| sum as f64 / count as f64)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "mean durations are approximate summary statistics"
)]
fn mean_duration(millis: impl Iterator<Item = i64>) -> Option<Duration> {
    let mut count: i64 = 0;
    let mut sum: i64 = 0;
    for value in millis {
        count += 1;
        sum += value;
    }
    (count > 0).then(|| {
        let mean_millis = (sum as f64 / count as f64).round().max(0.0);
        Duration::from_millis(mean_millis as u64)
    })
}

impl fmt::Display for RepositoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Analysis: {} =====", self.name_with_owner)?;
        writeln!(
            f,
            "Stars: {} | Forks: {} | Watchers: {}",
            self.stargazers, self.forks, self.watchers
        )?;
        if self.topics.is_empty() {
            writeln!(f, "Topics: none defined")?;
        } else {
            writeln!(f, "Topics: {}", self.topics.join(", "))?;
        }

        writeln!(f, "{} issues retrieved", self.issue_count)?;
        writeln!(f, "Open issues: {}", self.open_issues)?;
        writeln!(f, "Closed issues: {}", self.closed_issues)?;
        if let Some(mean_time) = self.mean_time_to_close {
            writeln!(
                f,
                "Average time to close: {} (does not account for issues closed and re-opened)",
                humantime::format_duration(truncate_to_seconds(mean_time))
            )?;
        }
        if let Some(mean_comments) = self.mean_comments_per_issue {
            writeln!(f, "Average comments per issue: {mean_comments:.2}")?;
        }

        writeln!(f, "{} pull requests retrieved", self.pull_request_count)?;
        writeln!(f, "Open PRs: {}", self.open_pull_requests)?;
        writeln!(f, "Closed PRs: {}", self.closed_pull_requests)?;
        writeln!(f, "Merged PRs: {}", self.merged_pull_requests)?;
        if let Some(mean_time) = self.mean_time_to_merge {
            writeln!(
                f,
                "Average time to merge: {}",
                humantime::format_duration(truncate_to_seconds(mean_time))
            )?;
        }
        if let Some(mean_comments) = self.mean_comments_per_pull_request {
            writeln!(f, "Average comments per PR: {mean_comments:.2}")?;
        }
        if let Some(mean_comments) = self.mean_comments_per_settled {
            writeln!(
                f,
                "Average comments per PR (closed or merged): {mean_comments:.2}"
            )?;
        }
        if let Some(mean_reviews) = self.mean_reviews_per_settled {
            writeln!(
                f,
                "Average reviews per PR (closed or merged): {mean_reviews:.2}"
            )?;
        }
        if let Some(mean_interactions) = self.mean_interactions_per_settled {
            writeln!(
                f,
                "Average interactions (comments, reviews, review comments) per PR (closed or merged): {mean_interactions:.2}"
            )?;
        }
        Ok(())
    }
}

/// Drops sub-second precision so durations render as whole units.
fn truncate_to_seconds(duration: Duration) -> Duration {
    Duration::from_secs(duration.as_secs())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use super::RepositoryReport;
    use crate::github::models::{
        Comment, Issue, ItemState, PullRequest, RepositoryDocument, RepositoryMetadata, Review,
    };

    fn metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            id: "R_1".to_owned(),
            database_id: Some(1),
            name: "hello-world".to_owned(),
            name_with_owner: "octocat/hello-world".to_owned(),
            owner: "octocat".to_owned(),
            description: None,
            url: "https://example.invalid/octocat/hello-world".to_owned(),
            ssh_url: "git@example.invalid:octocat/hello-world.git".to_owned(),
            homepage_url: None,
            created_at: Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            pushed_at: None,
            primary_language: Some("Rust".to_owned()),
            default_branch: Some("main".to_owned()),
            is_archived: false,
            is_disabled: false,
            is_fork: false,
            is_private: false,
            has_issues_enabled: true,
            has_wiki_enabled: false,
            merge_commit_allowed: true,
            rebase_merge_allowed: true,
            squash_merge_allowed: false,
            fork_count: 3,
            stargazer_count: 11,
            watcher_count: 2,
            open_issues: 1,
            total_issues: 2,
            open_pull_requests: 1,
            total_pull_requests: 2,
        }
    }

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.to_owned(),
            database_id: None,
            author: Some("alice".to_owned()),
            author_association: "MEMBER".to_owned(),
            body: "hi".to_owned(),
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            url: "https://example.invalid/comment".to_owned(),
        }
    }

    fn issue(number: u64, state: ItemState, closed_after_hours: Option<i64>) -> Issue {
        let created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        Issue {
            id: format!("I_{number}"),
            number,
            title: format!("issue {number}"),
            state,
            body: String::new(),
            author: Some("alice".to_owned()),
            closed_by: None,
            locked: false,
            milestone: None,
            created_at,
            updated_at: created_at,
            closed_at: closed_after_hours.map(|hours| created_at + chrono::Duration::hours(hours)),
            url: "https://example.invalid/issue".to_owned(),
            database_id: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            comments: vec![comment("c1")],
        }
    }

    fn review(comment_count: usize) -> Review {
        Review {
            id: "REV_1".to_owned(),
            database_id: None,
            author: Some("bob".to_owned()),
            body: String::new(),
            state: "APPROVED".to_owned(),
            submitted_at: None,
            url: "https://example.invalid/review".to_owned(),
            comments: (0..comment_count)
                .map(|index| crate::github::models::ReviewComment {
                    id: format!("RC_{index}"),
                    database_id: None,
                    author: None,
                    author_association: "NONE".to_owned(),
                    body: String::new(),
                    path: "src/lib.rs".to_owned(),
                    position: None,
                    original_position: None,
                    diff_hunk: String::new(),
                    commit: None,
                    original_commit: None,
                    created_at: Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
                    updated_at: Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
                    url: "https://example.invalid/rc".to_owned(),
                })
                .collect(),
        }
    }

    fn pull_request(
        number: u64,
        state: ItemState,
        merged_after_hours: Option<i64>,
        reviews: Vec<Review>,
    ) -> PullRequest {
        let created_at = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        PullRequest {
            id: format!("PR_{number}"),
            number,
            title: format!("pull {number}"),
            state,
            body: String::new(),
            author: Some("carol".to_owned()),
            author_association: "CONTRIBUTOR".to_owned(),
            milestone: None,
            created_at,
            updated_at: created_at,
            closed_at: merged_after_hours
                .map(|hours| created_at + chrono::Duration::hours(hours)),
            merged: state == ItemState::Merged,
            merged_at: merged_after_hours
                .map(|hours| created_at + chrono::Duration::hours(hours)),
            merged_by: None,
            mergeable: "UNKNOWN".to_owned(),
            merge_commit: None,
            additions: 10,
            deletions: 2,
            changed_files: 1,
            commit_count: 1,
            review_thread_count: 0,
            base_ref_id: None,
            head_ref_id: None,
            maintainer_can_modify: false,
            url: "https://example.invalid/pull".to_owned(),
            database_id: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            comments: vec![comment("pc1"), comment("pc2")],
            reviews,
        }
    }

    fn document() -> RepositoryDocument {
        RepositoryDocument {
            metadata: metadata(),
            topics: vec!["statistics".to_owned()],
            issues: vec![
                issue(1, ItemState::Open, None),
                issue(2, ItemState::Closed, Some(12)),
                issue(3, ItemState::Closed, Some(36)),
            ],
            pull_requests: vec![
                pull_request(10, ItemState::Open, None, Vec::new()),
                pull_request(11, ItemState::Merged, Some(24), vec![review(3), review(3)]),
            ],
        }
    }

    #[test]
    fn counts_split_by_state() {
        let report = RepositoryReport::from_document(&document());

        assert_eq!(report.issue_count, 3);
        assert_eq!(report.open_issues, 1);
        assert_eq!(report.closed_issues, 2);
        assert_eq!(report.pull_request_count, 2);
        assert_eq!(report.open_pull_requests, 1);
        assert_eq!(report.closed_pull_requests, 0);
        assert_eq!(report.merged_pull_requests, 1);
    }

    #[test]
    fn mean_time_to_close_averages_closed_issues() {
        let report = RepositoryReport::from_document(&document());

        // Closed after 12h and 36h; the mean is a day.
        assert_eq!(
            report.mean_time_to_close,
            Some(Duration::from_secs(24 * 60 * 60))
        );
    }

    #[test]
    fn mean_time_to_merge_averages_merged_pull_requests() {
        let report = RepositoryReport::from_document(&document());

        assert_eq!(
            report.mean_time_to_merge,
            Some(Duration::from_secs(24 * 60 * 60))
        );
    }

    #[test]
    fn comment_and_review_density_covers_settled_pull_requests() {
        let report = RepositoryReport::from_document(&document());

        assert_eq!(report.mean_comments_per_issue, Some(1.0));
        assert_eq!(report.mean_comments_per_pull_request, Some(2.0));
        assert_eq!(report.mean_comments_per_settled, Some(2.0));
        assert_eq!(report.mean_reviews_per_settled, Some(2.0));
        // 2 comments + 2 reviews + 6 review comments on the one settled PR.
        assert_eq!(report.mean_interactions_per_settled, Some(10.0));
    }

    #[test]
    fn means_are_absent_for_empty_inputs() {
        let empty = RepositoryDocument {
            metadata: metadata(),
            topics: Vec::new(),
            issues: Vec::new(),
            pull_requests: Vec::new(),
        };
        let report = RepositoryReport::from_document(&empty);

        assert_eq!(report.mean_time_to_close, None);
        assert_eq!(report.mean_comments_per_issue, None);
        assert_eq!(report.mean_time_to_merge, None);
        assert_eq!(report.mean_comments_per_pull_request, None);
        assert_eq!(report.mean_interactions_per_settled, None);
    }

    #[test]
    fn display_renders_the_analysis_block() {
        let report = RepositoryReport::from_document(&document());
        let rendered = report.to_string();

        assert!(rendered.contains("===== Analysis: octocat/hello-world ====="));
        assert!(rendered.contains("Stars: 11 | Forks: 3 | Watchers: 2"));
        assert!(rendered.contains("Topics: statistics"));
        assert!(rendered.contains("Average time to close: 1day"));
        assert!(rendered.contains("Merged PRs: 1"));
    }
}
