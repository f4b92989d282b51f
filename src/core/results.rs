use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate key as listed by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key_id: u64,
    pub group_id: u64,
    pub api_key: String,
}

/// Truncated display form of a key for exports and logs.
///
/// Keys of 20 characters or fewer pass through unchanged; longer keys keep
/// their first 20 characters followed by `...`.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() > 20 {
        let prefix: String = key.chars().take(20).collect();
        format!("{}...", prefix)
    } else {
        key.to_string()
    }
}

/// Terminal outcome of a single validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// HTTP 200
    Valid,
    /// Any other HTTP status
    Invalid,
    /// Per-call deadline exceeded
    TimedOut,
    /// Connection, DNS or protocol failure before a response
    Errored,
}

/// Outcome of testing one key against the gateway.
///
/// Exactly one of these is produced per [`KeyRecord`], no matter how the call
/// fails. `valid` is always `status_code == 200`; `status_code` 0 means no
/// HTTP response was obtained, and `response_time_ms` 0 means the call never
/// completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub key_id: u64,
    /// Masked form of the key, never the full secret
    pub api_key: String,
    pub group_id: u64,
    pub status_code: u16,
    pub response_time_ms: f64,
    pub timestamp: DateTime<Utc>,
    pub valid: bool,
    pub error_message: String,
}

impl ValidationResult {
    /// HTTP 200 within the deadline
    pub fn success(record: &KeyRecord, response_time_ms: f64) -> Self {
        Self::classified(record, 200, response_time_ms, String::new())
    }

    /// Any non-200 HTTP response
    pub fn http_failure(
        record: &KeyRecord,
        status_code: u16,
        response_time_ms: f64,
        error_message: String,
    ) -> Self {
        Self::classified(record, status_code, response_time_ms, error_message)
    }

    /// Per-call deadline exceeded; the configured timeout is recorded as the
    /// response time sentinel
    pub fn timeout(record: &KeyRecord, timeout_ms: f64) -> Self {
        Self::classified(record, 0, timeout_ms, "Timeout".to_string())
    }

    /// Transport-level failure before any response was received
    pub fn transport_failure(record: &KeyRecord, error_message: String) -> Self {
        Self::classified(record, 0, 0.0, error_message)
    }

    fn classified(
        record: &KeyRecord,
        status_code: u16,
        response_time_ms: f64,
        error_message: String,
    ) -> Self {
        Self {
            key_id: record.key_id,
            api_key: mask_key(&record.api_key),
            group_id: record.group_id,
            status_code,
            response_time_ms,
            timestamp: Utc::now(),
            valid: status_code == 200,
            error_message,
        }
    }

    pub fn outcome(&self) -> KeyOutcome {
        if self.valid {
            KeyOutcome::Valid
        } else if self.status_code != 0 {
            KeyOutcome::Invalid
        } else if self.response_time_ms > 0.0 {
            KeyOutcome::TimedOut
        } else {
            KeyOutcome::Errored
        }
    }
}

/// Aggregate statistics over a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub valid_percentage: f64,
    pub invalid_percentage: f64,
    /// Mean over results that actually completed (`response_time_ms > 0`);
    /// `None` when no call completed
    pub avg_response_time_ms: Option<f64>,
}

impl RunSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total = results.len();
        let valid = results.iter().filter(|r| r.valid).count();
        let invalid = total - valid;

        let measured: Vec<f64> = results
            .iter()
            .filter(|r| r.response_time_ms > 0.0)
            .map(|r| r.response_time_ms)
            .collect();
        let avg_response_time_ms = if measured.is_empty() {
            None
        } else {
            Some(measured.iter().sum::<f64>() / measured.len() as f64)
        };

        let pct = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };

        Self {
            total,
            valid,
            invalid,
            valid_percentage: pct(valid),
            invalid_percentage: pct(invalid),
            avg_response_time_ms,
        }
    }
}
