use crate::models::Tier;
use super::TierModel;

/// Reference net-worth brackets used for demos, tests and as the built-in
/// configuration when no settings file overrides them.
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::bounded("Bronze", 0, 24_999),
        Tier::bounded("Silver", 25_000, 99_999),
        Tier::bounded("Gold", 100_000, 249_999),
        Tier::bounded("Platinum", 250_000, 999_999),
        Tier::unbounded("Diamond", 1_000_000),
    ]
}

impl Default for TierModel {
    fn default() -> Self {
        Self::from_validated(default_tiers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_validate() {
        assert!(TierModel::validate(&default_tiers()).is_ok());
    }

    #[test]
    fn test_default_model_order() {
        let model = TierModel::default();
        let names: Vec<&str> = model.tiers().iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, ["Bronze", "Silver", "Gold", "Platinum", "Diamond"]);
        assert!(model.tiers().last().unwrap().is_top());
    }
}
