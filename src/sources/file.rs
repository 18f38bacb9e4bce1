use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    models::{UserProfile, Result},
    sources::{DataOrigin, ProfileSource},
};

/// Reads a JSON array of `{ "identifier": ..., "metric_value": ... }` records.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSource for JsonFileSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Imported
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }

    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let profiles: Vec<UserProfile> = serde_json::from_str(&raw)?;

        info!("Loaded {} profiles from {}", profiles.len(), self.path.display());
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierError;
    use rust_decimal::Decimal;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wealth_tiers_{}_{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_profiles() {
        let path = temp_file(
            "load",
            r#"[{"identifier":"maya","metric_value":82000},{"identifier":"jo","metric_value":1250.5}]"#,
        );
        let source = JsonFileSource::new(&path);

        let profiles = source.fetch_profiles().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.origin(), DataOrigin::Imported);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].metric_value, Decimal::from(82_000));
        assert_eq!(profiles[1].identifier, "jo");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here/profiles.json");

        assert!(matches!(source.fetch_profiles().await, Err(TierError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_serialization_error() {
        let path = temp_file("bad", r#"{"identifier": "not an array"}"#);
        let result = JsonFileSource::new(&path).fetch_profiles().await;
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(TierError::Serialization(_))));
    }
}
