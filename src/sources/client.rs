use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{UserProfile, Result};

/// Where a batch of profiles came from. Imported and synthetic data are
/// never mixed in one leaderboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataOrigin {
    /// Loaded from caller-supplied records.
    Imported,
    /// Generated placeholder data.
    Synthetic,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Imported => "imported",
            DataOrigin::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Tag attached to every profile this source yields
    fn origin(&self) -> DataOrigin;

    /// Human readable description for logs
    fn describe(&self) -> String;

    /// Fetch every profile the source knows about
    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>>;
}
