use crate::core::results::KeyRecord;
use crate::core::traits::KeySource;
use crate::core::TesterSettings;
use crate::utils::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Vec<ListedKey>,
}

#[derive(Debug, Deserialize)]
struct ListedKey {
    #[serde(default)]
    id: u64,
    // Upstream listings may omit the group; 0 stands in for "no group"
    #[serde(default)]
    group_id: u64,
    #[serde(default)]
    key: String,
}

/// Loads the candidate key set from the gateway's listing endpoint.
///
/// One authenticated `GET /api/keys`; any transport or parse failure is
/// logged and yields an empty vec rather than an error.
pub struct RemoteKeySource {
    base_url: String,
    auth_key: String,
}

impl RemoteKeySource {
    pub fn new(settings: &TesterSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            auth_key: settings.auth_key.clone(),
        }
    }
}

fn parse_listing(body: &[u8]) -> Result<Vec<KeyRecord>, serde_json::Error> {
    let listing: ListingResponse = serde_json::from_slice(body)?;
    Ok(listing
        .data
        .into_iter()
        .map(|k| KeyRecord {
            key_id: k.id,
            group_id: k.group_id,
            api_key: k.key,
        })
        .collect())
}

/// Turn a listing response into key records.
///
/// Any non-200 status or unparseable body is logged and yields an empty set;
/// the loader never raises.
fn keys_from_response(status_code: u16, body: &[u8]) -> Vec<KeyRecord> {
    if status_code != 200 {
        error!("Key listing failed: HTTP {}", status_code);
        return Vec::new();
    }

    match parse_listing(body) {
        Ok(keys) => {
            info!("Listing returned {} keys", keys.len());
            keys
        }
        Err(e) => {
            error!("Failed to parse key listing: {}", e);
            Vec::new()
        }
    }
}

#[async_trait]
impl KeySource for RemoteKeySource {
    async fn fetch_keys(&self) -> Vec<KeyRecord> {
        info!("Fetching key listing from {}", self.base_url);

        let url = format!("{}/api/keys", self.base_url);
        let auth = format!("Bearer {}", self.auth_key);

        let response = tokio::task::spawn_blocking(move || {
            let client = HttpClient::new();
            client.get(&url, &[("Authorization", &auth)])
        })
        .await;

        let response = match response {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("Key listing request failed: {}", e);
                return Vec::new();
            }
            Err(e) => {
                error!("Key listing task failed: {}", e);
                return Vec::new();
            }
        };

        keys_from_response(response.status_code, &response.body)
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing() {
        let body = br#"{"data": [
            {"id": 1, "group_id": 3, "key": "sk-first"},
            {"id": 2, "group_id": 3, "key": "sk-second"}
        ]}"#;
        let keys = parse_listing(body).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].key_id, 1);
        assert_eq!(keys[0].group_id, 3);
        assert_eq!(keys[1].api_key, "sk-second");
    }

    #[test]
    fn test_parse_listing_defaults_missing_group_to_zero() {
        let body = br#"{"data": [{"id": 9, "key": "sk-ungrouped"}]}"#;
        let keys = parse_listing(body).unwrap();
        assert_eq!(keys[0].group_id, 0);
    }

    #[test]
    fn test_parse_listing_without_data_field() {
        let keys = parse_listing(br#"{}"#).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_parse_listing_rejects_malformed_body() {
        assert!(parse_listing(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_non_200_listing_yields_empty() {
        let keys = keys_from_response(500, br#"{"message": "internal error"}"#);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_unparseable_200_body_yields_empty() {
        assert!(keys_from_response(200, b"<html>proxy error</html>").is_empty());
    }

    #[test]
    fn test_200_listing_yields_keys() {
        let body = br#"{"data": [{"id": 4, "group_id": 1, "key": "sk-ok"}]}"#;
        let keys = keys_from_response(200, body);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_id, 4);
    }
}
