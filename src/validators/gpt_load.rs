use crate::core::error::KeyTesterError;
use crate::core::results::{KeyRecord, ValidationResult};
use crate::core::traits::KeyTester;
use crate::core::TesterSettings;
use crate::utils::{HttpClient, HttpResponse};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Tests one key at a time against the gateway's per-key test endpoint.
///
/// One `POST /api/keys/{key_id}/test` per call, authenticated with the
/// run-wide bearer key. Every failure mode ends in a classified
/// [`ValidationResult`]; this type never returns an error to the runner.
pub struct GptLoadTester {
    base_url: String,
    auth_key: String,
    timeout: Duration,
}

impl GptLoadTester {
    pub fn new(settings: &TesterSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            auth_key: settings.auth_key.clone(),
            timeout: settings.request_timeout,
        }
    }
}

/// Elapsed wall-clock time in milliseconds, rounded to two decimal places
fn elapsed_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

/// Error detail for a non-200 response: the gateway's JSON `message` field
/// when the body has one, `HTTP {status}` otherwise
fn failure_message(status_code: u16, response: &HttpResponse) -> String {
    response
        .json::<ErrorBody>()
        .map(|body| body.message)
        .unwrap_or_else(|_| format!("HTTP {}", status_code))
}

#[async_trait]
impl KeyTester for GptLoadTester {
    async fn test_key(&self, record: &KeyRecord) -> ValidationResult {
        let url = format!("{}/api/keys/{}/test", self.base_url, record.key_id);
        let auth = format!("Bearer {}", self.auth_key);
        let timeout = self.timeout;

        // curl is sync; run the call on the blocking pool and time the full
        // request-to-response window there
        let outcome = tokio::task::spawn_blocking(move || {
            let client = HttpClient::with_timeout(timeout);
            let start = Instant::now();
            let response = client.post(
                &url,
                &[
                    ("Authorization", &auth),
                    ("Content-Type", "application/json"),
                ],
                "",
            );
            (elapsed_ms(start.elapsed()), response)
        })
        .await;

        match outcome {
            Ok((response_time_ms, Ok(response))) => {
                debug!(
                    "Key {} -> HTTP {} in {:.2} ms",
                    record.key_id, response.status_code, response_time_ms
                );
                if response.status_code == 200 {
                    ValidationResult::success(record, response_time_ms)
                } else {
                    let message = failure_message(response.status_code, &response);
                    ValidationResult::http_failure(
                        record,
                        response.status_code,
                        response_time_ms,
                        message,
                    )
                }
            }
            Ok((_, Err(KeyTesterError::Curl(e)))) if e.is_operation_timedout() => {
                debug!("Key {} timed out", record.key_id);
                ValidationResult::timeout(record, self.timeout.as_millis() as f64)
            }
            Ok((_, Err(e))) => ValidationResult::transport_failure(record, e.to_string()),
            Err(e) => {
                ValidationResult::transport_failure(record, format!("Task join error: {}", e))
            }
        }
    }
}
