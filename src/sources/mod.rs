use crate::core::error::{KeyTesterError, Result};
use crate::core::results::KeyRecord;
use crate::core::traits::KeySource;

pub mod file;
pub mod remote;

pub use file::FileKeySource;
pub use remote::RemoteKeySource;

/// Load the candidate key set, treating an empty result as fatal.
///
/// Sources fail open to empty, so this is the single gate where a run with
/// nothing to test aborts — before any validation work starts.
pub async fn load_keys(source: &dyn KeySource) -> Result<Vec<KeyRecord>> {
    let keys = source.fetch_keys().await;
    if keys.is_empty() {
        return Err(KeyTesterError::Listing(
            "no keys available to test".to_string(),
        ));
    }
    Ok(keys)
}
