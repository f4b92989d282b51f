//! The concurrent validation engine.
//!
//! All candidate keys are submitted at once; a counting semaphore admits at
//! most `max_concurrent` calls into flight, and completions are consumed on
//! this task in whatever order the gateway answers. Per-key failures are data
//! (classified [`ValidationResult`]s), so a run always produces exactly one
//! result per input key.

use crate::core::results::{KeyRecord, ValidationResult};
use crate::core::traits::{KeyTester, ProgressSink};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::info;

/// Emit a progress notification after this many completions
pub const PROGRESS_INTERVAL: usize = 100;

pub struct BatchRunner {
    tester: Arc<dyn KeyTester>,
    max_concurrent: usize,
    progress: Arc<dyn ProgressSink>,
}

impl BatchRunner {
    pub fn new(
        tester: Arc<dyn KeyTester>,
        max_concurrent: usize,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            tester,
            max_concurrent: max_concurrent.max(1),
            progress,
        }
    }

    /// Test every key and return one result per key, in completion order.
    pub async fn run(&self, keys: Vec<KeyRecord>) -> Vec<ValidationResult> {
        let total = keys.len();
        let gate = Arc::new(Semaphore::new(self.max_concurrent));

        info!(
            "Testing {} keys with up to {} concurrent calls",
            total, self.max_concurrent
        );

        let mut in_flight: FuturesUnordered<_> = keys
            .into_iter()
            .map(|record| {
                let gate = Arc::clone(&gate);
                let tester = Arc::clone(&self.tester);
                async move {
                    // Held for the whole call; dropped on every exit path
                    let _permit = gate.acquire_owned().await.expect("admission gate closed");
                    tester.test_key(&record).await
                }
            })
            .collect();

        let mut results = Vec::with_capacity(total);
        let mut valid_count = 0usize;

        while let Some(result) = in_flight.next().await {
            if result.valid {
                valid_count += 1;
            }
            self.progress.on_result(&result);
            results.push(result);

            let completed = results.len();
            if completed % PROGRESS_INTERVAL == 0 || completed == total {
                self.progress.on_progress(completed, total, valid_count);
            }
        }

        results
    }
}
