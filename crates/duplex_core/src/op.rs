//! Single-resolution asynchronous operations.
//!
//! # Responsibility
//! - Represent "a value or an error, available now or later" as a
//!   composable handle with `map`/`recover`/`on_complete` chaining.
//!
//! # Invariants
//! - Exactly one resolution is ever delivered per operation; the underlying
//!   oneshot channel rejects a second send by construction.
//! - Combinators never block; suspension points are the boundaries between
//!   chained operations.
//! - No guarantee is made about which task resolves a callback; callers
//!   must not assume synchronous completion.

use std::future::Future;

use tokio::sync::oneshot;

use crate::store::{StoreError, StoreResult};

/// A deferred `Result<T, StoreError>` produced by a store or repository.
///
/// Operations are driven by spawned tasks, so they make progress whether or
/// not the caller is currently awaiting them. Dropping the handle does not
/// cancel the underlying work; it only discards delivery of the result.
pub struct AsyncOp<T> {
    rx: oneshot::Receiver<StoreResult<T>>,
}

impl<T: Send + 'static> AsyncOp<T> {
    /// Runs `future` on the runtime and resolves with its output.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = StoreResult<T>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            // A dropped receiver only means nobody is listening anymore.
            let _ = tx.send(future.await);
        });
        Self { rx }
    }

    /// An operation already resolved with `value`.
    pub fn ready(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// An operation already resolved with `error`.
    pub fn fail(error: StoreError) -> Self {
        Self::from_result(Err(error))
    }

    fn from_result(result: StoreResult<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    /// Awaits the single resolution of this operation.
    ///
    /// A producer that went away without resolving surfaces as a
    /// `Backend` error rather than hanging the caller.
    pub async fn resolve(self) -> StoreResult<T> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(StoreError::backend(
                "async operation dropped before resolving",
            )),
        }
    }

    /// Transforms the eventual success value; failures pass through.
    pub fn map<U, F>(self, transform: F) -> AsyncOp<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncOp::spawn(async move { self.resolve().await.map(transform) })
    }

    /// Transforms the eventual failure; successes pass through.
    pub fn map_err<F>(self, transform: F) -> Self
    where
        F: FnOnce(StoreError) -> StoreError + Send + 'static,
    {
        Self::spawn(async move { self.resolve().await.map_err(transform) })
    }

    /// On failure, substitutes the operation produced by `fallback`;
    /// successes pass through unchanged.
    pub fn recover<F>(self, fallback: F) -> Self
    where
        F: FnOnce(StoreError) -> AsyncOp<T> + Send + 'static,
    {
        Self::spawn(async move {
            match self.resolve().await {
                Ok(value) => Ok(value),
                Err(error) => fallback(error).resolve().await,
            }
        })
    }

    /// Attaches an observer invoked with the eventual success value.
    ///
    /// The observer sees the value by reference and cannot alter the
    /// result; failures skip the observer entirely.
    pub fn on_complete<F>(self, observer: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::spawn(async move {
            let result = self.resolve().await;
            if let Ok(value) = &result {
                observer(value);
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::AsyncOp;
    use crate::store::StoreError;

    #[tokio::test]
    async fn ready_resolves_with_value() {
        assert_eq!(AsyncOp::ready(7).resolve().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn map_transforms_success_and_passes_failure_through() {
        let doubled = AsyncOp::ready(21).map(|n| n * 2);
        assert_eq!(doubled.resolve().await.unwrap(), 42);

        let failed: AsyncOp<i32> = AsyncOp::fail(StoreError::backend("down"));
        let err = failed.map(|n| n * 2).resolve().await.unwrap_err();
        assert_eq!(err, StoreError::backend("down"));
    }

    #[tokio::test]
    async fn map_err_rewrites_failure_only() {
        let failed: AsyncOp<i32> = AsyncOp::fail(StoreError::backend("down"));
        let err = failed
            .map_err(|_| StoreError::backend("rewritten"))
            .resolve()
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::backend("rewritten"));

        let ok = AsyncOp::ready(1)
            .map_err(|_| StoreError::backend("rewritten"))
            .resolve()
            .await;
        assert_eq!(ok.unwrap(), 1);
    }

    #[tokio::test]
    async fn recover_substitutes_on_failure_only() {
        let recovered = AsyncOp::<i32>::fail(StoreError::backend("down"))
            .recover(|_| AsyncOp::ready(9))
            .resolve()
            .await;
        assert_eq!(recovered.unwrap(), 9);

        let untouched = AsyncOp::ready(1)
            .recover(|_| AsyncOp::ready(9))
            .resolve()
            .await;
        assert_eq!(untouched.unwrap(), 1);
    }

    #[tokio::test]
    async fn on_complete_observes_success_without_altering_result() {
        let seen = Arc::new(AtomicBool::new(false));
        let observer_seen = Arc::clone(&seen);
        let value = AsyncOp::ready(5)
            .on_complete(move |n| {
                assert_eq!(*n, 5);
                observer_seen.store(true, Ordering::SeqCst);
            })
            .resolve()
            .await
            .unwrap();
        assert_eq!(value, 5);
        assert!(seen.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn on_complete_skips_observer_on_failure() {
        let seen = Arc::new(AtomicBool::new(false));
        let observer_seen = Arc::clone(&seen);
        let result = AsyncOp::<i32>::fail(StoreError::backend("down"))
            .on_complete(move |_| observer_seen.store(true, Ordering::SeqCst))
            .resolve()
            .await;
        assert!(result.is_err());
        assert!(!seen.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn spawned_work_resolves_later() {
        let op = AsyncOp::spawn(async {
            tokio::task::yield_now().await;
            Ok("later")
        });
        assert_eq!(op.resolve().await.unwrap(), "later");
    }
}
