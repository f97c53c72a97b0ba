//! End-to-end crawl over HTTP against a mock GraphQL endpoint.

use repopulse::github::NoopProgress;
use repopulse::{
    CrawlSettings, GitHubExecutor, PersonalAccessToken, RepositoryCrawler, RepositoryName,
    RepositoryOwner, RetrievalError,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_connection() -> Value {
    json!({ "edges": [], "pageInfo": { "endCursor": null, "hasNextPage": false } })
}

fn repository_body() -> Value {
    json!({
        "data": {
            "repository": {
                "id": "R_1",
                "databaseId": 100,
                "name": "hello-world",
                "nameWithOwner": "octocat/hello-world",
                "owner": { "login": "octocat" },
                "description": null,
                "url": "https://example.invalid/octocat/hello-world",
                "sshUrl": "git@example.invalid:octocat/hello-world.git",
                "homepageUrl": null,
                "createdAt": "2019-01-01T00:00:00Z",
                "updatedAt": "2020-01-01T00:00:00Z",
                "pushedAt": null,
                "primaryLanguage": null,
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
                "forkCount": 0,
                "stargazers": { "totalCount": 5 },
                "watchers": { "totalCount": 1 },
                "openIssues": { "totalCount": 0 },
                "issues": { "totalCount": 0 },
                "openPullRequests": { "totalCount": 0 },
                "pullRequests": { "totalCount": 0 },
                "repositoryTopics": empty_connection()
            }
        }
    })
}

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mergeCommitAllowed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_body()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("issues(first:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "issues": empty_connection() } }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("pullRequests(first:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "pullRequests": empty_connection() } }
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn coordinates() -> (RepositoryOwner, RepositoryName) {
    (
        RepositoryOwner::new("octocat").expect("owner should be valid"),
        RepositoryName::new("hello-world").expect("name should be valid"),
    )
}

fn executor_for(server: &MockServer) -> GitHubExecutor {
    let token = PersonalAccessToken::new("test-token").expect("token should be valid");
    let uri = server.uri();
    GitHubExecutor::for_token(&token, Some(uri.as_str())).expect("executor should build")
}

#[tokio::test]
async fn crawl_walks_every_collection_over_http() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let executor = executor_for(&server);
    let progress = NoopProgress;
    let crawler = RepositoryCrawler::new(&executor, &progress, CrawlSettings::default());
    let (owner, name) = coordinates();

    let document = crawler
        .crawl(&owner, &name)
        .await
        .expect("crawl should succeed");

    assert_eq!(document.metadata.stargazer_count, 5);
    assert!(document.topics.is_empty());
    assert!(document.issues.is_empty());
    assert!(document.pull_requests.is_empty());
}

#[tokio::test]
async fn http_failure_surfaces_as_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let executor = executor_for(&server);
    let progress = NoopProgress;
    let crawler = RepositoryCrawler::new(&executor, &progress, CrawlSettings::default());
    let (owner, name) = coordinates();

    let error = crawler
        .crawl(&owner, &name)
        .await
        .expect_err("crawl should fail");

    assert!(
        matches!(error, RetrievalError::Transport { .. }),
        "expected Transport, got {error:?}"
    );
}

#[tokio::test]
async fn graphql_error_payload_surfaces_as_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [ { "message": "Could not resolve to a Repository" } ]
        })))
        .mount(&server)
        .await;

    let executor = executor_for(&server);
    let progress = NoopProgress;
    let crawler = RepositoryCrawler::new(&executor, &progress, CrawlSettings::default());
    let (owner, name) = coordinates();

    let error = crawler
        .crawl(&owner, &name)
        .await
        .expect_err("crawl should fail");

    match error {
        RetrievalError::Transport { message } => {
            assert!(
                message.contains("Could not resolve to a Repository"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}
