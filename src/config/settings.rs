use serde::{Deserialize, Serialize};
use config::{Config, File};
use std::path::Path;
use tracing::debug;

use crate::{
    models::{Tier, Result},
    tiers::{default_tiers, TierModel},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub tiers: Vec<Tier>,
    pub leaderboard: LeaderboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub default_top: usize,
    pub demo_profiles: usize,
    pub demo_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Wealth Tiers".to_string(),
                log_level: "info".to_string(),
            },
            tiers: default_tiers(),
            leaderboard: LeaderboardSettings {
                default_top: 10,
                demo_profiles: 25,
                demo_seed: 42,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::from_dir("config")
    }

    /// Defaults, then optional `default` and `local` files under `dir`, then
    /// `WEALTH_TIERS__*` environment variables. A file that exists but does
    /// not parse is an error.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(dir.join("default").as_path()).required(false))
            .add_source(File::from(dir.join("local").as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("WEALTH_TIERS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        debug!("Loaded settings with {} tiers", settings.tiers.len());
        Ok(settings)
    }

    /// An explicit file when given, else the layered lookup.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::new(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Fails fast on a tier list the model would reject.
    pub fn validate(&self) -> Result<()> {
        TierModel::validate(&self.tiers)
    }

    pub fn tier_model(&self) -> Result<TierModel> {
        TierModel::new(self.tiers.clone())
    }
}
