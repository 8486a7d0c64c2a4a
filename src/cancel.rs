use std::future::Future;

use crate::errors::ApiError;

/// Race an operation against a cancellation signal.
///
/// When the signal resolves first the operation's future is dropped and
/// the distinct request-aborted error (HTTP 499) is returned, never a
/// generic failure and never a partial result. An operation that already
/// completed wins; anything it committed stands.
///
/// Handler futures dropped on client disconnect remain the primary
/// cancellation path in this stack (an uncommitted Sea-ORM transaction
/// rolls back on drop); this combinator is for callers that hold an
/// explicit signal, such as a shutdown or deadline future.
///
/// # Errors
///
/// Returns [`ApiError::Aborted`] when the signal fires before the
/// operation completes, otherwise whatever the operation returns.
pub async fn abortable<T, S, F>(signal: S, operation: F) -> Result<T, ApiError>
where
    S: Future<Output = ()>,
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        () = signal => Err(ApiError::aborted()),
        result = operation => result,
    }
}
