use async_trait::async_trait;

use super::results::{KeyRecord, ValidationResult};

/// Trait for obtaining the candidate set of keys to test.
///
/// Implementations fail open: any transport or parse failure yields an empty
/// vec, which the caller treats as the one fatal precondition for a run.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Load the candidate keys, or an empty vec on failure
    async fn fetch_keys(&self) -> Vec<KeyRecord>;

    /// Name of the source (e.g. "remote", "file")
    fn name(&self) -> &str;
}

/// Trait for validating one key against the gateway.
///
/// `test_key` is total: every failure path terminates in a fully-populated
/// [`ValidationResult`], never in an error.
#[async_trait]
pub trait KeyTester: Send + Sync {
    async fn test_key(&self, record: &KeyRecord) -> ValidationResult;
}

/// Observational callbacks from the batch runner.
///
/// Purely informational; implementations must not influence scheduling.
pub trait ProgressSink: Send + Sync {
    /// Called once per completed validation, in completion order
    fn on_result(&self, _result: &ValidationResult) {}

    /// Called after every 100th completion and after the final one
    fn on_progress(&self, completed: usize, total: usize, valid: usize);
}
