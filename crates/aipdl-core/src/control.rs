//! Cooperative cancellation for a batch run.
//!
//! One token is shared by the batch runner, every airport orchestrator and
//! every fetch worker. Setting it stops new work from starting: workers
//! answer queued jobs with [`FetchError::Cancelled`](crate::retry::FetchError)
//! instead of fetching, and orchestrators stop between states.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
