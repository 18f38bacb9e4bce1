use crate::{
    models::{TierError, TierStanding, UserProfile, Result},
    sources::{DataOrigin, ProfileSource},
    tiers::TierModel,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub standing: TierStanding,
}

/// Profiles ranked by metric value, highest first, with their tier standing.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    origin: DataOrigin,
    entries: Vec<LeaderboardEntry>,
    tier_counts: Vec<(String, usize)>,
}

impl Leaderboard {
    /// Ranks `profiles` against `model`.
    ///
    /// Ordering is by metric descending, then identifier ascending. Equal
    /// metrics share a rank and the following rank is skipped (1, 2, 2, 4).
    pub fn rank(model: &TierModel, mut profiles: Vec<UserProfile>, origin: DataOrigin) -> Result<Self> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.identifier.as_str()) {
                return Err(TierError::DuplicateProfile(profile.identifier.clone()));
            }
        }

        profiles.sort_by(|a, b| {
            b.metric_value
                .cmp(&a.metric_value)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });

        let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(profiles.len());
        for (i, profile) in profiles.iter().enumerate() {
            let rank = match entries.last() {
                Some(prev) if prev.standing.metric_value == profile.metric_value => prev.rank,
                _ => i + 1,
            };

            entries.push(LeaderboardEntry {
                rank,
                standing: model.evaluate(profile),
            });
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &entries {
            if let Some(tier) = &entry.standing.tier {
                *counts.entry(tier.name.as_str()).or_insert(0) += 1;
            }
        }

        let tier_counts = model
            .tiers()
            .iter()
            .map(|tier| (tier.name.clone(), counts.get(tier.name.as_str()).copied().unwrap_or(0)))
            .collect();

        Ok(Self {
            origin,
            entries,
            tier_counts,
        })
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn position_of(&self, identifier: &str) -> Option<&LeaderboardEntry> {
        self.entries
            .iter()
            .find(|entry| entry.standing.identifier == identifier)
    }

    /// Members per tier, in tier order, including empty tiers.
    pub fn tier_counts(&self) -> &[(String, usize)] {
        &self.tier_counts
    }

    /// Members whose metric places them below every tier.
    pub fn unranked_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.standing.tier.is_none())
            .count()
    }
}

/// Pulls profiles from a source and ranks them against a tier model.
pub struct LeaderboardBuilder {
    model: TierModel,
}

impl LeaderboardBuilder {
    pub fn new(model: TierModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &TierModel {
        &self.model
    }

    pub async fn build(&self, source: &dyn ProfileSource) -> Result<Leaderboard> {
        info!("Building leaderboard from {}", source.describe());

        let profiles = source.fetch_profiles().await?;

        for profile in profiles.iter().filter(|p| p.is_negative()) {
            warn!(
                "Profile {} has negative metric {}; it will be listed without a tier",
                profile.identifier, profile.metric_value
            );
        }

        let leaderboard = Leaderboard::rank(&self.model, profiles, source.origin())?;
        info!(
            "Ranked {} {} profiles ({} unranked)",
            leaderboard.len(),
            leaderboard.origin(),
            leaderboard.unranked_count()
        );

        Ok(leaderboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use rust_decimal::Decimal;

    mock! {
        pub Source {}

        #[async_trait]
        impl ProfileSource for Source {
            fn origin(&self) -> DataOrigin;
            fn describe(&self) -> String;
            async fn fetch_profiles(&self) -> Result<Vec<UserProfile>>;
        }
    }

    fn profile(id: &str, value: i64) -> UserProfile {
        UserProfile::new(id, Decimal::from(value))
    }

    fn sample() -> Vec<UserProfile> {
        vec![
            profile("maya", 82_000),
            profile("ollie", 1_250_000),
            profile("jo", 8_200),
            profile("sam", 82_000),
            profile("rin", -50),
        ]
    }

    #[test]
    fn test_rank_order_and_ties() {
        let board = Leaderboard::rank(&TierModel::default(), sample(), DataOrigin::Imported).unwrap();
        let ranked: Vec<(usize, &str)> = board
            .entries()
            .iter()
            .map(|e| (e.rank, e.standing.identifier.as_str()))
            .collect();

        assert_eq!(ranked, vec![(1, "ollie"), (2, "maya"), (2, "sam"), (4, "jo"), (5, "rin")]);
    }

    #[test]
    fn test_tier_counts_include_empty_tiers() {
        let board = Leaderboard::rank(&TierModel::default(), sample(), DataOrigin::Imported).unwrap();

        assert_eq!(
            board.tier_counts(),
            &[
                ("Bronze".to_string(), 1),
                ("Silver".to_string(), 2),
                ("Gold".to_string(), 0),
                ("Platinum".to_string(), 0),
                ("Diamond".to_string(), 1),
            ]
        );
        assert_eq!(board.unranked_count(), 1);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let profiles = vec![profile("maya", 1), profile("maya", 2)];
        let result = Leaderboard::rank(&TierModel::default(), profiles, DataOrigin::Imported);

        assert!(matches!(result, Err(TierError::DuplicateProfile(id)) if id == "maya"));
    }

    #[test]
    fn test_top_and_position() {
        let board = Leaderboard::rank(&TierModel::default(), sample(), DataOrigin::Imported).unwrap();

        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(50).len(), 5);
        assert_eq!(board.position_of("jo").unwrap().rank, 4);
        assert_eq!(board.position_of("jo").unwrap().standing.tier_name(), "Bronze");
        assert!(board.position_of("nobody").is_none());
    }

    #[tokio::test]
    async fn test_builder_keeps_source_origin() {
        let mut source = MockSource::new();
        source.expect_origin().return_const(DataOrigin::Synthetic);
        source.expect_describe().return_const("mock".to_string());
        source.expect_fetch_profiles().times(1).returning(|| Ok(sample()));

        let board = LeaderboardBuilder::new(TierModel::default())
            .build(&source)
            .await
            .unwrap();

        assert_eq!(board.origin(), DataOrigin::Synthetic);
        assert_eq!(board.len(), 5);
    }

    #[tokio::test]
    async fn test_builder_propagates_source_error() {
        let mut source = MockSource::new();
        source.expect_origin().return_const(DataOrigin::Imported);
        source.expect_describe().return_const("broken".to_string());
        source
            .expect_fetch_profiles()
            .returning(|| Err(TierError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))));

        let result = LeaderboardBuilder::new(TierModel::default()).build(&source).await;

        assert!(matches!(result, Err(TierError::Io(_))));
    }
}
