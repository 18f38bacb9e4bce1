pub mod models;
pub mod config;
pub mod tiers;
pub mod sources;

pub use models::{Tier, TierError, TierProgress, TierStanding, UserProfile, Result};
pub use crate::config::Settings;
pub use tiers::{current_tier, progress_to_next, Leaderboard, LeaderboardBuilder, TierModel};
pub use sources::{DataOrigin, DemoSource, JsonFileSource, ProfileSource};

// Re-export commonly used types
pub use rust_decimal::Decimal;
