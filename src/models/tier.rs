use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

/// A named wealth bracket with an inclusive lower bound and an optional
/// inclusive upper bound. A tier without `max_value` is the unbounded top tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tier {
    pub name: String,
    pub min_value: Decimal,
    #[serde(default)]
    pub max_value: Option<Decimal>,
}

impl Tier {
    pub fn new(name: impl Into<String>, min_value: Decimal, max_value: Option<Decimal>) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
        }
    }

    /// Bounded tier covering `[min, max]`.
    pub fn bounded(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(name, Decimal::from(min), Some(Decimal::from(max)))
    }

    /// Top tier covering `[min, ∞)`.
    pub fn unbounded(name: impl Into<String>, min: i64) -> Self {
        Self::new(name, Decimal::from(min), None)
    }

    pub fn contains(&self, value: Decimal) -> bool {
        if value < self.min_value {
            return false;
        }

        match self.max_value {
            Some(max) => value <= max,
            None => true,
        }
    }

    pub fn is_top(&self) -> bool {
        self.max_value.is_none()
    }

    /// Width of the tier's interval, `None` for the top tier.
    pub fn span(&self) -> Option<Decimal> {
        self.max_value.map(|max| max - self.min_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_contains_is_inclusive() {
        let bronze = Tier::bounded("Bronze", 0, 24_999);

        assert!(bronze.contains(Decimal::ZERO));
        assert!(bronze.contains(Decimal::from(24_999)));
        assert!(!bronze.contains(Decimal::from(25_000)));
        assert!(!bronze.contains(Decimal::from(-1)));
    }

    #[test]
    fn test_unbounded_contains_everything_above_min() {
        let diamond = Tier::unbounded("Diamond", 1_000_000);

        assert!(diamond.is_top());
        assert!(diamond.contains(Decimal::from(1_000_000)));
        assert!(diamond.contains(Decimal::from(i64::MAX)));
        assert!(!diamond.contains(Decimal::from(999_999)));
        assert_eq!(diamond.span(), None);
    }

    #[test]
    fn test_missing_max_value_deserializes_as_top_tier() {
        let tier: Tier = serde_json::from_str(r#"{"name":"Diamond","min_value":1000000}"#).unwrap();

        assert_eq!(tier, Tier::unbounded("Diamond", 1_000_000));
    }
}
