pub mod model;
pub mod defaults;
pub mod leaderboard;

pub use model::{current_tier, progress_to_next, TierModel};
pub use defaults::default_tiers;
pub use leaderboard::{Leaderboard, LeaderboardBuilder, LeaderboardEntry};
