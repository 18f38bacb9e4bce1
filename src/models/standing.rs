use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::Tier;

/// How far a value has moved through its current tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierProgress {
    pub next: Option<Tier>,
    pub progress: f64,
}

/// A profile evaluated against a tier model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStanding {
    pub identifier: String,
    pub metric_value: Decimal,
    pub tier: Option<Tier>,
    pub next: Option<Tier>,
    pub progress: f64,
    pub evaluated_at: DateTime<Utc>,
}

impl TierStanding {
    pub fn tier_name(&self) -> &str {
        self.tier.as_ref().map(|t| t.name.as_str()).unwrap_or("Unranked")
    }

    pub fn next_name(&self) -> Option<&str> {
        self.next.as_ref().map(|t| t.name.as_str())
    }

    /// Remaining distance to the next tier's entry point, if there is one.
    pub fn remaining_to_next(&self) -> Option<Decimal> {
        self.next
            .as_ref()
            .map(|next| (next.min_value - self.metric_value).max(Decimal::ZERO))
    }
}
