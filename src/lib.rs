//! # Key Tester
//!
//! Concurrent batch validation of API keys against a GPT-Load gateway.
//!
//! ## Features
//!
//! - **Bounded concurrency**: a counting admission gate caps in-flight calls
//! - **Total classification**: every key ends in exactly one result
//!   (valid, HTTP failure, timeout or transport failure)
//! - **Completion-ordered aggregation**: live progress as results arrive
//! - **Flat export**: CSV or JSON, plus an aggregate run summary
//!
//! ## Architecture
//!
//! Three traits form the seams:
//!
//! - `KeySource`: loads the candidate key set (gateway listing or local file)
//! - `KeyTester`: validates one key and classifies the outcome
//! - `ProgressSink`: observes completions without influencing scheduling
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use key_tester::{BatchRunner, GptLoadTester, ProgressSink, TesterSettings};
//!
//! struct Quiet;
//! impl ProgressSink for Quiet {
//!     fn on_progress(&self, _completed: usize, _total: usize, _valid: usize) {}
//! }
//!
//! # async fn run(keys: Vec<key_tester::KeyRecord>) {
//! let settings = TesterSettings::new(
//!     "http://localhost:3001",
//!     "auth-key".to_string(),
//!     50,
//!     Duration::from_secs(30),
//! );
//! let tester = Arc::new(GptLoadTester::new(&settings));
//! let runner = BatchRunner::new(tester, settings.max_concurrent, Arc::new(Quiet));
//! let results = runner.run(keys).await;
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod reporters;
pub mod sources;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use crate::core::{
    mask_key, Config, KeyOutcome, KeyRecord, KeySource, KeyTester, KeyTesterError, ProgressSink,
    Result, RunSummary, TesterSettings, ValidationResult,
};

pub use engine::BatchRunner;
pub use reporters::{default_filename, get_exporter, CsvExporter, Exporter, JsonExporter};
pub use sources::{load_keys, FileKeySource, RemoteKeySource};
pub use validators::GptLoadTester;
