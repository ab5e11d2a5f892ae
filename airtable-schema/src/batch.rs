//! Request batching.
//!
//! Airtable accepts at most [`MAX_RECORDS_PER_REQUEST`] records per write.
//! Larger inputs are split into consecutive batches that are issued
//! concurrently and reassembled in input order.

use std::future::Future;

use futures::future::join_all;

/// Maximum records Airtable accepts in a single create, update or delete.
pub const MAX_RECORDS_PER_REQUEST: usize = 10;

/// Splits `items` into consecutive batches of at most `size` elements.
///
/// A `size` of zero is treated as one.
///
/// ## Examples
///
/// ```
/// use airtable_schema::chunk;
///
/// let batches = chunk((0..23).collect(), 10);
/// let sizes: Vec<_> = batches.iter().map(Vec::len).collect();
/// assert_eq!(sizes, [10, 10, 3]);
/// ```
pub fn chunk<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(size).collect());
    }
    batches
}

/// Runs `op` once per batch of `items` and concatenates the results in
/// input order.
///
/// All batches are issued before any completes. Every issued call runs to
/// completion; if any failed, the error of the first failing batch (in
/// input order) is returned.
///
/// ## Errors
///
/// Returns the first batch error in input order.
pub async fn in_batches<T, R, E, F, Fut>(items: Vec<T>, mut op: F) -> Result<Vec<R>, E>
where
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
{
    let calls: Vec<Fut> = chunk(items, MAX_RECORDS_PER_REQUEST)
        .into_iter()
        .map(&mut op)
        .collect();

    tracing::debug!(batches = calls.len(), "Issuing batched requests");

    let mut results = Vec::new();
    for outcome in join_all(calls).await {
        results.extend(outcome?);
    }
    Ok(results)
}
