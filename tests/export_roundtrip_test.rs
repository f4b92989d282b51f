use chrono::DateTime;
use key_tester::{CsvExporter, Exporter, JsonExporter, KeyRecord, ValidationResult};
use std::fs;

fn sample_results() -> Vec<ValidationResult> {
    let records: Vec<KeyRecord> = vec![
        KeyRecord {
            key_id: 1,
            group_id: 2,
            api_key: "sk-short".to_string(),
        },
        KeyRecord {
            key_id: 2,
            group_id: 2,
            api_key: "sk-".to_string() + &"a".repeat(40),
        },
        KeyRecord {
            key_id: 3,
            group_id: 0,
            api_key: "sk-third".to_string(),
        },
        KeyRecord {
            key_id: 4,
            group_id: 5,
            api_key: "sk-fourth".to_string(),
        },
    ];

    vec![
        ValidationResult::success(&records[0], 42.13),
        ValidationResult::http_failure(
            &records[1],
            401,
            17.5,
            "invalid key, please check \"group\" settings".to_string(),
        ),
        ValidationResult::timeout(&records[2], 30000.0),
        ValidationResult::transport_failure(&records[3], "connection refused".to_string()),
    ]
}

/// Minimal RFC-4180 field splitter for reading exports back
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[test]
fn csv_export_round_trips_every_field() {
    let results = sample_results();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");

    key_tester::reporters::export(&results, &path, &CsvExporter).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = doc.lines().collect();
    assert_eq!(lines.len(), results.len() + 1);
    assert_eq!(
        lines[0],
        "key_id,api_key,group_id,status_code,response_time_ms,timestamp,valid,error_message"
    );

    for (line, expected) in lines[1..].iter().zip(&results) {
        let fields = parse_csv_line(line);
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], expected.key_id.to_string());
        assert_eq!(fields[1], expected.api_key);
        assert_eq!(fields[2], expected.group_id.to_string());
        assert_eq!(fields[3], expected.status_code.to_string());

        let response_time: f64 = fields[4].parse().unwrap();
        assert!((response_time - expected.response_time_ms).abs() < 0.005);

        let timestamp = DateTime::parse_from_rfc3339(&fields[5]).unwrap();
        assert_eq!(timestamp.with_timezone(&chrono::Utc), expected.timestamp);

        assert_eq!(fields[6], expected.valid.to_string());
        assert_eq!(fields[7], expected.error_message);
    }
}

#[test]
fn csv_export_masks_long_keys() {
    let results = sample_results();
    let doc = CsvExporter.render(&results).unwrap();

    // 40-char secret appears only in masked form
    assert!(!doc.contains(&"a".repeat(40)));
    assert!(doc.contains(&format!("sk-{}...", "a".repeat(17))));
}

#[test]
fn json_export_round_trips() {
    let results = sample_results();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    key_tester::reporters::export(&results, &path, &JsonExporter).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    let parsed: Vec<ValidationResult> = serde_json::from_str(&doc).unwrap();
    assert_eq!(parsed.len(), results.len());
    for (read, expected) in parsed.iter().zip(&results) {
        assert_eq!(read.key_id, expected.key_id);
        assert_eq!(read.api_key, expected.api_key);
        assert_eq!(read.status_code, expected.status_code);
        assert_eq!(read.valid, expected.valid);
        assert_eq!(read.error_message, expected.error_message);
    }
}
