use crate::core::error::Result;
use crate::core::results::ValidationResult;

use super::Exporter;

const HEADER: &str = "key_id,api_key,group_id,status_code,response_time_ms,timestamp,valid,error_message";

/// Renders results as RFC-4180-style CSV, one row per key
pub struct CsvExporter;

/// Quote a field when it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl Exporter for CsvExporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String> {
        let mut doc = String::with_capacity(results.len() * 96 + HEADER.len());
        doc.push_str(HEADER);
        doc.push('\n');

        for result in results {
            doc.push_str(&format!(
                "{},{},{},{},{:.2},{},{},{}\n",
                result.key_id,
                escape(&result.api_key),
                result.group_id,
                result.status_code,
                result.response_time_ms,
                escape(&result.timestamp.to_rfc3339()),
                result.valid,
                escape(&result.error_message),
            ));
        }

        Ok(doc)
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
