use crate::core::error::{KeyTesterError, Result};
use crate::core::results::ValidationResult;
use chrono::Utc;
use std::path::Path;

mod csv;
mod json;

pub use csv::CsvExporter;
pub use json::JsonExporter;

/// Trait for serializing a completed result set to a flat document
pub trait Exporter: Send + Sync {
    /// Render the whole result set; must not mutate it
    fn render(&self, results: &[ValidationResult]) -> Result<String>;

    /// File extension for the default filename
    fn extension(&self) -> &str;
}

/// Look up an exporter by format name
pub fn get_exporter(format: &str) -> Option<Box<dyn Exporter>> {
    match format.to_lowercase().as_str() {
        "csv" => Some(Box::new(CsvExporter)),
        "json" => Some(Box::new(JsonExporter)),
        _ => None,
    }
}

/// Default export filename embedding the current timestamp
pub fn default_filename(extension: &str) -> String {
    format!(
        "key_test_results_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Render and write the result set in one operation.
///
/// The document is built fully in memory first, so a failure never leaves a
/// partial file behind.
pub fn export(
    results: &[ValidationResult],
    path: &Path,
    exporter: &dyn Exporter,
) -> Result<()> {
    let doc = exporter.render(results)?;
    std::fs::write(path, doc)
        .map_err(|e| KeyTesterError::Export(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_exporter_by_format() {
        assert!(get_exporter("csv").is_some());
        assert!(get_exporter("JSON").is_some());
        assert!(get_exporter("xml").is_none());
    }

    #[test]
    fn test_default_filename_shape() {
        let name = default_filename("csv");
        assert!(name.starts_with("key_test_results_"));
        assert!(name.ends_with(".csv"));
        // key_test_results_YYYYMMDD_HHMMSS.csv
        assert_eq!(name.len(), "key_test_results_".len() + 15 + 4);
    }

    #[test]
    fn test_export_failure_reports_path() {
        let err = export(&[], Path::new("/nonexistent/dir/out.csv"), &CsvExporter).unwrap_err();
        assert!(matches!(err, KeyTesterError::Export(_)));
        assert!(err.to_string().contains("/nonexistent/dir/out.csv"));
    }
}
