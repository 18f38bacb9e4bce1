use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    models::{UserProfile, Result},
    sources::{DataOrigin, ProfileSource},
};

const HANDLE_PREFIXES: &[&str] = &[
    "diamond", "bull", "bear", "moon", "stonk", "yolo", "theta", "alpha", "quant", "degen",
];

const HANDLE_SUFFIXES: &[&str] = &[
    "hands", "rider", "whale", "trader", "ape", "wolf", "maxi", "scalper", "hodler", "gambler",
];

/// Placeholder leaderboard data for demos. Output is fully determined by the
/// seed, and every profile is tagged synthetic.
pub struct DemoSource {
    count: usize,
    seed: u64,
    min_value: f64,
    max_value: f64,
}

impl DemoSource {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            min_value: 1_000.0,
            max_value: 5_000_000.0,
        }
    }

    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value.max(1.0);
        self.max_value = max_value.max(self.min_value);
        self
    }

    pub fn generate(&self) -> Vec<UserProfile> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (low, high) = (self.min_value.ln(), self.max_value.ln());

        (0..self.count)
            .map(|i| {
                let prefix = HANDLE_PREFIXES[rng.gen_range(0..HANDLE_PREFIXES.len())];
                let suffix = HANDLE_SUFFIXES[rng.gen_range(0..HANDLE_SUFFIXES.len())];

                // Net worth is spread log-uniformly so every tier gets members.
                let exponent = if high > low { rng.gen_range(low..high) } else { low };
                let net_worth = Decimal::from_f64(exponent.exp())
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(2);

                UserProfile::new(format!("{}_{}{:03}", prefix, suffix, i + 1), net_worth)
            })
            .collect()
    }
}

#[async_trait]
impl ProfileSource for DemoSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Synthetic
    }

    fn describe(&self) -> String {
        format!("demo generator ({} profiles, seed {})", self.count, self.seed)
    }

    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>> {
        let profiles = self.generate();
        debug!("Generated {} synthetic profiles", profiles.len());
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_profiles() {
        let a = DemoSource::new(25, 7).generate();
        let b = DemoSource::new(25, 7).generate();

        assert_eq!(a, b);
    }

    #[test]
    fn test_identifiers_unique_and_values_in_range() {
        let profiles = DemoSource::new(200, 42).generate();
        let ids: HashSet<&str> = profiles.iter().map(|p| p.identifier.as_str()).collect();

        assert_eq!(ids.len(), 200);
        for profile in &profiles {
            assert!(profile.metric_value >= Decimal::from(999));
            assert!(profile.metric_value <= Decimal::from(5_000_001));
        }
    }

    #[test]
    fn test_collapsed_range() {
        let profiles = DemoSource::new(3, 1).with_range(5_000.0, 5_000.0).generate();

        assert!(profiles.iter().all(|p| p.metric_value == Decimal::from(5_000)));
    }

    #[tokio::test]
    async fn test_tagged_synthetic() {
        let source = DemoSource::new(4, 3);

        assert_eq!(source.origin(), DataOrigin::Synthetic);
        assert_eq!(source.fetch_profiles().await.unwrap().len(), 4);
    }
}
