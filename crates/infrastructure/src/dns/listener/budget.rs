use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared count of queries left to serve across all listeners.
///
/// Claiming the last slot cancels `shutdown`, so every listener stops
/// accepting once the budget is spent.
#[derive(Clone, Debug)]
pub struct QueryBudget {
    remaining: Option<Arc<AtomicU64>>,
    shutdown: CancellationToken,
}

impl QueryBudget {
    pub fn unlimited(shutdown: CancellationToken) -> Self {
        Self {
            remaining: None,
            shutdown,
        }
    }

    /// `None` means unlimited.
    pub fn new(limit: Option<u64>, shutdown: CancellationToken) -> Self {
        Self {
            remaining: limit.map(|n| Arc::new(AtomicU64::new(n))),
            shutdown,
        }
    }

    /// Claims one query; `false` once the budget is exhausted.
    pub fn try_acquire(&self) -> bool {
        let Some(remaining) = &self.remaining else {
            return true;
        };

        match remaining.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1)) {
            Ok(previous) => {
                if previous == 1 {
                    self.shutdown.cancel();
                }
                true
            }
            Err(_) => false,
        }
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
            .as_ref()
            .map(|remaining| remaining.load(Ordering::Acquire))
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }
}
