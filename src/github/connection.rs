//! Pagination primitives shared by every GraphQL collection.
//!
//! GitHub's GraphQL API returns collections as connections: a bounded batch
//! of items plus a `pageInfo` block carrying the continuation cursor. This
//! module models that wire shape ([`Connection`]) and the normalised form the
//! paginator consumes ([`Page`]).

use serde::Deserialize;

/// Continuation state attached to every paginated connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Opaque cursor identifying the end of this page, if the server sent one.
    #[serde(default)]
    pub end_cursor: Option<String>,
    /// Whether more pages exist after this one.
    pub has_next_page: bool,
}

/// A single `edges { node }` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Edge<T> {
    /// The wrapped node.
    pub node: T,
}

/// A list of edges with no pagination metadata.
///
/// Used for bounded selections such as an issue's closing timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EdgeList<T> {
    /// The edges in arrival order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

/// A connection that only selects its total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTotal {
    /// Total number of items in the collection.
    pub total_count: u64,
}

/// One paginated GraphQL connection as it appears on the wire.
///
/// The API mixes two item shapes: embedded first pages use `edges { node }`
/// while some continuation queries select `nodes` directly. Both deserialise
/// here; [`Connection::into_page`] flattens whichever is present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Total item count when the query selected it.
    #[serde(default)]
    pub total_count: Option<u64>,
    /// `edges { node }` items, when the query used the edge shape.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    /// Bare `nodes` items, when the query used the node shape.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Continuation state for this connection.
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Flattens the wire shape into the paginator's [`Page`] currency.
    #[must_use]
    pub fn into_page(self) -> Page<T> {
        let items = if self.edges.is_empty() {
            self.nodes
        } else {
            self.edges.into_iter().map(|edge| edge.node).collect()
        };
        Page {
            items,
            next_cursor: self.page_info.end_cursor,
            has_more: self.page_info.has_next_page,
        }
    }
}

/// One bounded batch of items from a paginated collection.
///
/// Produced by one request and never mutated; the paginator consumes it
/// immediately. `next_cursor` is only meaningful while `has_more` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in arrival order.
    pub items: Vec<T>,
    /// Opaque continuation token for the next page, if the server sent one.
    pub next_cursor: Option<String>,
    /// Whether more pages exist after this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Builds a final page that needs no continuation.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            has_more: false,
        }
    }
}
