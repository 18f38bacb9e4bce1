use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

/// A scored subject: a handle plus the single metric it is ranked by
/// (net worth in USD for the product leaderboard).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub identifier: String,
    pub metric_value: Decimal,
}

impl UserProfile {
    pub fn new(identifier: impl Into<String>, metric_value: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            metric_value,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.metric_value < Decimal::ZERO
    }
}
