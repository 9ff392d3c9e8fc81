//! Fetches tied to the lifetime of a view.
//!
//! A [`ViewScope`] cancels everything started through it when it is dropped,
//! so a response that arrives after its view has gone is discarded instead
//! of being applied to stale state.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::errors::{ClientError, Result};

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A nested scope, cancelled with this one or on its own drop.
    pub fn child(&self) -> ViewScope {
        ViewScope {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `fut` until it completes or the scope is cancelled.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        race(self.token.clone(), fut).await
    }

    /// Spawns `fut` on the runtime under this scope.
    pub fn spawn<F, T>(&self, fut: F) -> JoinHandle<Result<T>>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(race(token, fut))
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn race<F, T>(token: CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        // Cancellation wins a tie so a late result is never delivered.
        biased;
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = fut => {
            if token.is_cancelled() {
                Err(ClientError::Cancelled)
            } else {
                result
            }
        }
    }
}
