//! GraphQL query-string builders for the crawl.
//!
//! Queries are assembled as plain strings with the page size and continuation
//! cursor interpolated, matching the single-string capability the executor
//! exposes. Builders come in two families: repository-scoped collections
//! (issues, pull requests, topics) and node-scoped continuations keyed by an
//! entity id with an inline fragment on the entity kind.

/// Entity kind used for inline fragments in node-scoped continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    /// A repository issue.
    Issue,
    /// A repository pull request.
    PullRequest,
}

impl EntityKind {
    /// GraphQL type name for the inline fragment.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "Issue",
            Self::PullRequest => "PullRequest",
        }
    }
}

const AUTHOR: &str = "author { login __typename ... on User { databaseId id login } }";
const PAGE_INFO: &str = "pageInfo { endCursor hasNextPage }";
const COMMENT_FIELDS: &str = "authorAssociation body createdAt url databaseId id updatedAt";
const REVIEW_FIELDS: &str = "body url databaseId id state submittedAt";
const REVIEW_COMMENT_FIELDS: &str = "authorAssociation body commit { oid } createdAt diffHunk \
     url databaseId id originalCommit { oid } originalPosition path position updatedAt";

fn after_clause(cursor: Option<&str>) -> String {
    cursor.map_or_else(String::new, |cursor| format!(r#", after: "{cursor}""#))
}

/// Repository metadata with collection totals and the first page of topics.
pub(crate) fn repository(owner: &str, name: &str, page_size: u8) -> String {
    format!(
        r#"{{
  repository(owner: "{owner}", name: "{name}") {{
    mergeCommitAllowed
    rebaseMergeAllowed
    squashMergeAllowed
    isArchived
    createdAt
    defaultBranchRef {{ name }}
    description
    isDisabled
    isFork
    forkCount
    nameWithOwner
    hasIssuesEnabled
    hasWikiEnabled
    homepageUrl
    url
    databaseId
    primaryLanguage {{ name }}
    name
    id
    openIssues: issues(states: OPEN) {{ totalCount }}
    issues {{ totalCount }}
    openPullRequests: pullRequests(states: OPEN) {{ totalCount }}
    pullRequests {{ totalCount }}
    owner {{ login }}
    isPrivate
    pushedAt
    sshUrl
    stargazers {{ totalCount }}
    updatedAt
    watchers {{ totalCount }}
    repositoryTopics(first: {page_size}) {{
      edges {{ node {{ topic {{ name }} }} }}
      {PAGE_INFO}
    }}
  }}
}}"#
    )
}

/// Continuation page of repository topics.
pub(crate) fn topics(owner: &str, name: &str, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  repository(owner: "{owner}", name: "{name}") {{
    repositoryTopics(first: {page_size}{after}) {{
      edges {{ node {{ topic {{ name }} }} }}
      {PAGE_INFO}
    }}
  }}
}}"#
    )
}

/// One page of issues with embedded first pages of their sub-collections.
pub(crate) fn issues(
    owner: &str,
    name: &str,
    page_size: u8,
    nested_page_size: u8,
    cursor: Option<&str>,
) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  repository(owner: "{owner}", name: "{name}") {{
    issues(first: {page_size}{after}) {{
      edges {{
        node {{
          body
          closedAt
          createdAt
          url
          databaseId
          locked
          milestone {{ id title }}
          id
          number
          state
          title
          updatedAt
          {AUTHOR}
          timelineItems(last: 1, itemTypes: CLOSED_EVENT) {{
            edges {{ node {{ ... on ClosedEvent {{ actor {{ login }} }} }} }}
          }}
          assignees(first: {nested_page_size}) {{
            edges {{ node {{ login }} }}
            {PAGE_INFO}
          }}
          labels(first: {nested_page_size}) {{
            edges {{ node {{ description }} }}
            {PAGE_INFO}
          }}
          comments(first: {nested_page_size}) {{
            edges {{ node {{ {COMMENT_FIELDS} {AUTHOR} }} }}
            {PAGE_INFO}
          }}
        }}
      }}
      {PAGE_INFO}
    }}
  }}
}}"#
    )
}

/// One page of pull requests with embedded first pages of their
/// sub-collections, including review threads and their comment pages.
pub(crate) fn pull_requests(
    owner: &str,
    name: &str,
    page_size: u8,
    nested_page_size: u8,
    cursor: Option<&str>,
) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  repository(owner: "{owner}", name: "{name}") {{
    pullRequests(first: {page_size}{after}) {{
      edges {{
        node {{
          additions
          authorAssociation
          baseRef {{ id }}
          body
          changedFiles
          closedAt
          commits {{ totalCount }}
          createdAt
          deletions
          headRef {{ id }}
          url
          databaseId
          maintainerCanModify
          mergeCommit {{ oid }}
          mergeable
          merged
          mergedAt
          mergedBy {{ login }}
          milestone {{ id title }}
          id
          number
          reviewThreadCount: reviewThreads {{ totalCount }}
          state
          title
          updatedAt
          {AUTHOR}
          assignees(first: {nested_page_size}) {{
            edges {{ node {{ login }} }}
            {PAGE_INFO}
          }}
          labels(first: {nested_page_size}) {{
            edges {{ node {{ description }} }}
            {PAGE_INFO}
          }}
          comments(first: {nested_page_size}) {{
            edges {{ node {{ {COMMENT_FIELDS} {AUTHOR} }} }}
            {PAGE_INFO}
          }}
          reviews(first: {nested_page_size}) {{
            edges {{ node {{ {REVIEW_FIELDS} {AUTHOR} }} }}
            {PAGE_INFO}
          }}
          reviewThreads(first: {nested_page_size}) {{
            edges {{
              node {{
                id
                comments(first: {nested_page_size}) {{
                  edges {{ node {{ {REVIEW_COMMENT_FIELDS} {AUTHOR} }} }}
                  {PAGE_INFO}
                }}
              }}
            }}
            {PAGE_INFO}
          }}
        }}
      }}
      {PAGE_INFO}
    }}
  }}
}}"#
    )
}

/// Continuation page of an issue's or pull request's assignees.
pub(crate) fn assignees(id: &str, kind: EntityKind, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    let entity = kind.as_str();
    format!(
        r#"{{
  node(id: "{id}") {{
    ... on {entity} {{
      assignees(first: {page_size}{after}) {{
        nodes {{ login }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}

/// Continuation page of an issue's or pull request's labels.
pub(crate) fn labels(id: &str, kind: EntityKind, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    let entity = kind.as_str();
    format!(
        r#"{{
  node(id: "{id}") {{
    ... on {entity} {{
      labels(first: {page_size}{after}) {{
        nodes {{ description }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}

/// Continuation page of an issue's or pull request's discussion comments.
pub(crate) fn comments(id: &str, kind: EntityKind, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    let entity = kind.as_str();
    format!(
        r#"{{
  node(id: "{id}") {{
    ... on {entity} {{
      comments(first: {page_size}{after}) {{
        edges {{ node {{ {COMMENT_FIELDS} {AUTHOR} }} }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}

/// Continuation page of a pull request's reviews.
pub(crate) fn reviews(id: &str, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  node(id: "{id}") {{
    ... on PullRequest {{
      reviews(first: {page_size}{after}) {{
        edges {{ node {{ {REVIEW_FIELDS} {AUTHOR} }} }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}

/// Continuation page of a pull request's review threads, each carrying the
/// first page of its own comments.
pub(crate) fn review_threads(id: &str, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  node(id: "{id}") {{
    ... on PullRequest {{
      reviewThreads(first: {page_size}{after}) {{
        edges {{
          node {{
            id
            comments(first: {page_size}) {{
              edges {{ node {{ {REVIEW_COMMENT_FIELDS} {AUTHOR} }} }}
              {PAGE_INFO}
            }}
          }}
        }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}

/// Continuation page of a single review thread's comments.
pub(crate) fn review_comments(thread_id: &str, page_size: u8, cursor: Option<&str>) -> String {
    let after = after_clause(cursor);
    format!(
        r#"{{
  node(id: "{thread_id}") {{
    ... on PullRequestReviewThread {{
      comments(first: {page_size}{after}) {{
        edges {{ node {{ {REVIEW_COMMENT_FIELDS} {AUTHOR} }} }}
        {PAGE_INFO}
      }}
    }}
  }}
}}"#
    )
}
