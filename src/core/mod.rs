pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::{Config, GatewayConfig, RunnerConfig, TesterSettings};
pub use error::{KeyTesterError, Result};
pub use results::{mask_key, KeyOutcome, KeyRecord, RunSummary, ValidationResult};
pub use traits::{KeySource, KeyTester, ProgressSink};
