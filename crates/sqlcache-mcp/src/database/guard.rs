//! Timeout wrapper for database round trips

use std::future::Future;
use std::time::Duration;

use crate::Error;

/// Bounds every database call with a fixed timeout
#[derive(Debug, Clone, Copy)]
pub struct QueryGuard {
    timeout: Duration,
}

impl QueryGuard {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a query function with timeout
    pub async fn execute<F, T, E>(&self, query_fn: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Error>,
    {
        tokio::time::timeout(self.timeout, query_fn)
            .await
            .map_err(|_| Error::QueryTimeout(self.timeout))?
            .map_err(Into::into)
    }
}
