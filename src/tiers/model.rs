use crate::models::{Tier, TierError, TierProgress, TierStanding, UserProfile, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use chrono::Utc;
use std::collections::HashSet;
use tracing::debug;

/// Returns the first tier, in list order, that claims `value`.
///
/// A tier followed by another claims everything from its minimum up to the
/// next tier's minimum, so fractional values above a whole-number maximum
/// stay in the lower tier. Negative values, an empty list and values below
/// the first tier's minimum all yield `None`. If a malformed list has
/// overlapping tiers the earliest match wins.
pub fn current_tier(tiers: &[Tier], value: Decimal) -> Option<&Tier> {
    if value < Decimal::ZERO {
        return None;
    }

    tier_position(tiers, value).map(|index| &tiers[index])
}

fn tier_position(tiers: &[Tier], value: Decimal) -> Option<usize> {
    tiers.iter().enumerate().position(|(i, tier)| match tiers.get(i + 1) {
        Some(next) => tier.min_value <= value && (value < next.min_value || tier.contains(value)),
        None => tier.contains(value),
    })
}

/// Computes the tier after the one holding `value` and how far `value` has
/// travelled through its current tier, clamped to `[0, 1]`.
pub fn progress_to_next(tiers: &[Tier], value: Decimal) -> TierProgress {
    let Some(first) = tiers.first() else {
        return TierProgress { next: None, progress: 0.0 };
    };

    // Below the first tier: a minimum of 0 would divide by zero, so floor it at 1.
    if value < first.min_value {
        let denominator = first.min_value.max(Decimal::ONE);
        return TierProgress {
            next: Some(first.clone()),
            progress: clamped_ratio(value, denominator),
        };
    }

    let Some(index) = tier_position(tiers, value) else {
        // Only reachable above a bounded last tier.
        return TierProgress { next: None, progress: 1.0 };
    };

    let tier = &tiers[index];
    match tier.span() {
        None => TierProgress { next: None, progress: 1.0 },
        Some(span) => {
            // Values past a whole-number maximum clamp to 1.
            let progress = if span <= Decimal::ZERO {
                1.0
            } else {
                clamped_ratio(value - tier.min_value, span)
            };

            TierProgress {
                next: tiers.get(index + 1).cloned(),
                progress,
            }
        }
    }
}

fn clamped_ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.to_f64())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}

/// An ordered, validated and immutable list of tiers.
///
/// Construction rejects any list that is empty, unordered, overlapping,
/// gapped, or that leaves a non-final tier unbounded. Once built the model is
/// read-only and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct TierModel {
    tiers: Vec<Tier>,
}

impl TierModel {
    pub fn new(tiers: Vec<Tier>) -> Result<Self> {
        Self::validate(&tiers)?;
        debug!("Built tier model with {} tiers", tiers.len());

        Ok(Self { tiers })
    }

    /// Skips validation; only for lists known to be well formed.
    pub(crate) fn from_validated(tiers: Vec<Tier>) -> Self {
        debug_assert!(Self::validate(&tiers).is_ok());
        Self { tiers }
    }

    pub fn validate(tiers: &[Tier]) -> Result<()> {
        let Some(last) = tiers.last() else {
            return Err(TierError::Configuration("tier list is empty".to_string()));
        };

        let mut names = HashSet::new();
        for tier in tiers {
            let name = tier.name.trim();
            if name.is_empty() {
                return Err(TierError::Configuration("tier name must not be blank".to_string()));
            }

            if !names.insert(name.to_lowercase()) {
                return Err(TierError::Configuration(format!("duplicate tier name '{}'", name)));
            }

            if tier.min_value < Decimal::ZERO {
                return Err(TierError::Configuration(format!(
                    "tier '{}' has negative minimum {}",
                    name, tier.min_value
                )));
            }

            if let Some(max) = tier.max_value {
                if max < tier.min_value {
                    return Err(TierError::Configuration(format!(
                        "tier '{}' has maximum {} below minimum {}",
                        name, max, tier.min_value
                    )));
                }
            }
        }

        if let Some(max) = last.max_value {
            return Err(TierError::Configuration(format!(
                "last tier '{}' must be unbounded, found maximum {}",
                last.name, max
            )));
        }

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            let Some(prev_max) = prev.max_value else {
                return Err(TierError::Configuration(format!(
                    "tier '{}' is unbounded but is followed by '{}'",
                    prev.name, next.name
                )));
            };

            if next.min_value <= prev.min_value {
                return Err(TierError::Configuration(format!(
                    "tiers not ascending: '{}' starts at {} after '{}' starts at {}",
                    next.name, next.min_value, prev.name, prev.min_value
                )));
            }

            let expected = prev_max + Decimal::ONE;
            if next.min_value < expected {
                return Err(TierError::Configuration(format!(
                    "tier '{}' overlaps '{}': starts at {} but '{}' ends at {}",
                    next.name, prev.name, next.min_value, prev.name, prev_max
                )));
            }

            if next.min_value > expected {
                return Err(TierError::Configuration(format!(
                    "gap between '{}' and '{}': expected start {}, found {}",
                    prev.name, next.name, expected, next.min_value
                )));
            }
        }

        Ok(())
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier_named(&self, name: &str) -> Result<&Tier> {
        self.tiers
            .iter()
            .find(|tier| tier.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| TierError::UnknownTier(name.to_string()))
    }

    pub fn current_tier(&self, value: Decimal) -> Option<&Tier> {
        current_tier(&self.tiers, value)
    }

    pub fn progress_to_next(&self, value: Decimal) -> TierProgress {
        progress_to_next(&self.tiers, value)
    }

    pub fn evaluate(&self, profile: &UserProfile) -> TierStanding {
        let tier = self.current_tier(profile.metric_value).cloned();
        let TierProgress { next, progress } = self.progress_to_next(profile.metric_value);

        TierStanding {
            identifier: profile.identifier.clone(),
            metric_value: profile.metric_value,
            tier,
            next,
            progress,
            evaluated_at: Utc::now(),
        }
    }
}
