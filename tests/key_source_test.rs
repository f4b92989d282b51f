use async_trait::async_trait;
use key_tester::{
    load_keys, BatchRunner, KeyRecord, KeySource, KeyTester, KeyTesterError, ProgressSink,
    ValidationResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Source behaving like a listing fetch that hit HTTP 500: fails open to empty
struct UnreachableSource;

#[async_trait]
impl KeySource for UnreachableSource {
    async fn fetch_keys(&self) -> Vec<KeyRecord> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

struct GoodSource;

#[async_trait]
impl KeySource for GoodSource {
    async fn fetch_keys(&self) -> Vec<KeyRecord> {
        vec![KeyRecord {
            key_id: 1,
            group_id: 0,
            api_key: "sk-one".to_string(),
        }]
    }

    fn name(&self) -> &str {
        "good"
    }
}

/// Counts invocations so a test can prove validation never started
struct CountingTester {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl KeyTester for CountingTester {
    async fn test_key(&self, record: &KeyRecord) -> ValidationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ValidationResult::success(record, 1.0)
    }
}

struct QuietSink;

impl ProgressSink for QuietSink {
    fn on_progress(&self, _completed: usize, _total: usize, _valid: usize) {}
}

#[tokio::test]
async fn empty_listing_is_fatal_before_any_validation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tester = Arc::new(CountingTester {
        calls: calls.clone(),
    });

    // Mirrors the binary's flow: the gate fires before the runner exists
    let outcome = match load_keys(&UnreachableSource).await {
        Ok(keys) => {
            let runner = BatchRunner::new(tester, 50, Arc::new(QuietSink));
            Ok(runner.run(keys).await)
        }
        Err(e) => Err(e),
    };

    let err = outcome.unwrap_err();
    assert!(matches!(err, KeyTesterError::Listing(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_empty_listing_passes_the_gate() {
    let keys = load_keys(&GoodSource).await.unwrap();
    assert_eq!(keys.len(), 1);

    let calls = Arc::new(AtomicUsize::new(0));
    let tester = Arc::new(CountingTester {
        calls: calls.clone(),
    });
    let runner = BatchRunner::new(tester, 50, Arc::new(QuietSink));
    let results = runner.run(keys).await;

    assert_eq!(results.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
