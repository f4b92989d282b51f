use crate::core::error::{KeyTesterError, Result};
use crate::core::results::ValidationResult;

use super::Exporter;

/// Renders the full result set as a pretty-printed JSON array
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String> {
        serde_json::to_string_pretty(results)
            .map_err(|e| KeyTesterError::Export(format!("JSON serialization failed: {}", e)))
    }

    fn extension(&self) -> &str {
        "json"
    }
}
