//! Generic cursor-following loop for exhausting a paginated collection.

use std::future::Future;

use super::connection::Page;
use super::error::RetrievalError;

/// Exhausts a paginated collection starting from an already-fetched page.
///
/// Items are concatenated in arrival order; the loop condition is driven by
/// the most recent page's `has_more`/`next_cursor` pair and terminates only
/// when the server reports `has_more = false`. A server that always reports
/// another page causes this loop to run forever; that honesty assumption is a
/// documented limitation, not a mitigated one.
///
/// The same operation is reused at every level of the crawl hierarchy:
/// topics, issues' and pull requests' sub-collections, review threads, and
/// thread comments all drain through here.
///
/// # Errors
///
/// Propagates any error from `fetch_next` unchanged, and fails with
/// [`RetrievalError::Transport`] when a page claims more data without
/// carrying a continuation cursor (malformed server response).
pub async fn drain<T, Fetch, Fut>(
    first_page: Page<T>,
    mut fetch_next: Fetch,
) -> Result<Vec<T>, RetrievalError>
where
    Fetch: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, RetrievalError>>,
{
    let Page {
        mut items,
        mut next_cursor,
        mut has_more,
    } = first_page;

    while has_more {
        let cursor = next_cursor.take().ok_or_else(missing_cursor)?;
        let page = fetch_next(cursor).await?;
        items.extend(page.items);
        next_cursor = page.next_cursor;
        has_more = page.has_more;
    }

    Ok(items)
}

/// Error for a page that claims more data without a continuation cursor.
pub(crate) fn missing_cursor() -> RetrievalError {
    RetrievalError::Transport {
        message: "page reported more data but carried no continuation cursor".to_owned(),
    }
}
