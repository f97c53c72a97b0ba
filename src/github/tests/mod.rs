//! Unit tests for the retrieval crawler and enricher.
//!
//! Fixtures build the raw `data` payloads the scripted executor serves, in
//! the exact shapes the GraphQL queries produce.

use serde_json::{Value, json};


/// A connection with no items and no further pages.
fn empty_connection() -> Value {
    json!({
        "edges": [],
        "pageInfo": { "endCursor": null, "hasNextPage": false }
    })
}

/// An edge-shaped connection over the given nodes.
fn connection(nodes: Vec<Value>, cursor: Option<&str>, has_more: bool) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
    json!({
        "edges": edges,
        "pageInfo": { "endCursor": cursor, "hasNextPage": has_more }
    })
}

/// A node-shaped connection, as served by assignee/label continuations.
fn node_connection(nodes: Vec<Value>, cursor: Option<&str>, has_more: bool) -> Value {
    json!({
        "nodes": nodes,
        "pageInfo": { "endCursor": cursor, "hasNextPage": has_more }
    })
}

fn comment_node(id: &str) -> Value {
    json!({
        "id": id,
        "databaseId": 1,
        "authorAssociation": "MEMBER",
        "body": format!("comment {id}"),
        "createdAt": "2020-03-01T00:00:00Z",
        "updatedAt": "2020-03-01T00:00:00Z",
        "url": format!("https://example.invalid/comments/{id}"),
        "author": { "login": "alice" }
    })
}

fn review_comment_node(id: &str) -> Value {
    json!({
        "id": id,
        "databaseId": 2,
        "authorAssociation": "MEMBER",
        "body": format!("review comment {id}"),
        "commit": { "oid": "abc123" },
        "createdAt": "2020-03-02T00:00:00Z",
        "diffHunk": "@@ -1 +1 @@",
        "url": format!("https://example.invalid/review-comments/{id}"),
        "originalCommit": null,
        "originalPosition": 1,
        "path": "src/lib.rs",
        "position": 1,
        "updatedAt": "2020-03-02T00:00:00Z",
        "author": { "login": "bob" }
    })
}

fn review_node(id: &str) -> Value {
    json!({
        "id": id,
        "databaseId": 3,
        "body": "looks good",
        "url": format!("https://example.invalid/reviews/{id}"),
        "state": "APPROVED",
        "submittedAt": "2020-03-03T00:00:00Z",
        "author": { "login": "carol" }
    })
}

/// An issue node with the given id/number and sub-collection connections.
fn issue_node(id: &str, number: u64, assignees: Value, labels: Value, comments: Value) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("issue {number}"),
        "state": "OPEN",
        "body": "something is broken",
        "createdAt": "2020-02-01T00:00:00Z",
        "updatedAt": "2020-02-02T00:00:00Z",
        "closedAt": null,
        "url": format!("https://example.invalid/issues/{number}"),
        "databaseId": number,
        "locked": false,
        "milestone": null,
        "author": { "login": "alice" },
        "timelineItems": { "edges": [] },
        "assignees": assignees,
        "labels": labels,
        "comments": comments
    })
}

/// A pull request node with the given sub-collection connections.
fn pull_request_node(
    id: &str,
    number: u64,
    comments: Value,
    reviews: Value,
    review_threads: Value,
) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("pull {number}"),
        "state": "MERGED",
        "body": "fixes things",
        "authorAssociation": "CONTRIBUTOR",
        "createdAt": "2020-02-10T00:00:00Z",
        "updatedAt": "2020-02-11T00:00:00Z",
        "closedAt": "2020-02-12T00:00:00Z",
        "url": format!("https://example.invalid/pulls/{number}"),
        "databaseId": number,
        "milestone": null,
        "author": { "login": "carol" },
        "additions": 5,
        "deletions": 1,
        "changedFiles": 2,
        "commits": { "totalCount": 3 },
        "baseRef": { "id": "REF_base" },
        "headRef": { "id": "REF_head" },
        "maintainerCanModify": true,
        "mergeCommit": { "oid": "def456" },
        "mergeable": "UNKNOWN",
        "merged": true,
        "mergedAt": "2020-02-12T00:00:00Z",
        "mergedBy": { "login": "alice" },
        "reviewThreadCount": { "totalCount": 1 },
        "assignees": empty_connection(),
        "labels": empty_connection(),
        "comments": comments,
        "reviews": reviews,
        "reviewThreads": review_threads
    })
}

/// A repository payload with collection totals and a single-page topic list.
fn repository_data(total_issues: u64, total_pull_requests: u64) -> Value {
    json!({
        "repository": {
            "id": "R_1",
            "databaseId": 100,
            "name": "hello-world",
            "nameWithOwner": "octocat/hello-world",
            "owner": { "login": "octocat" },
            "description": "demo repository",
            "url": "https://example.invalid/octocat/hello-world",
            "sshUrl": "git@example.invalid:octocat/hello-world.git",
            "homepageUrl": null,
            "createdAt": "2019-01-01T00:00:00Z",
            "updatedAt": "2020-01-01T00:00:00Z",
            "pushedAt": "2020-01-01T00:00:00Z",
            "primaryLanguage": { "name": "Rust" },
            "defaultBranchRef": { "name": "main" },
            "isArchived": false,
            "isDisabled": false,
            "isFork": false,
            "isPrivate": false,
            "hasIssuesEnabled": true,
            "hasWikiEnabled": false,
            "mergeCommitAllowed": true,
            "rebaseMergeAllowed": true,
            "squashMergeAllowed": false,
            "forkCount": 3,
            "stargazers": { "totalCount": 11 },
            "watchers": { "totalCount": 2 },
            "openIssues": { "totalCount": 1 },
            "issues": { "totalCount": total_issues },
            "openPullRequests": { "totalCount": 0 },
            "pullRequests": { "totalCount": total_pull_requests },
            "repositoryTopics": {
                "edges": [ { "node": { "topic": { "name": "statistics" } } } ],
                "pageInfo": { "endCursor": null, "hasNextPage": false }
            }
        }
    })
}

fn issues_page(issues: Vec<Value>, cursor: Option<&str>, has_more: bool) -> Value {
    json!({ "repository": { "issues": connection(issues, cursor, has_more) } })
}

fn pull_requests_page(pulls: Vec<Value>, cursor: Option<&str>, has_more: bool) -> Value {
    json!({ "repository": { "pullRequests": connection(pulls, cursor, has_more) } })
}
