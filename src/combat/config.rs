//! Battle tuning constants. Defaults reproduce the game's literal values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub const DEFAULT_PVE_ROUND_LIMIT: u32 = 500;
pub const DEFAULT_PVP_ROUND_LIMIT: u32 = 200;
pub const DEFAULT_ELEMENTAL_BONUS: f64 = 0.15;
/// 10 fights per minute.
pub const DEFAULT_FIGHTS_PER_HOUR: f64 = 600.0;
pub const DEFAULT_FIGHTS_PER_DAY: f64 = 14_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub pve_round_limit: u32,
    pub pvp_round_limit: u32,
    /// Damage bonus credited per matching element slot.
    pub elemental_bonus: f64,
    pub fights_per_hour: f64,
    pub fights_per_day: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            pve_round_limit: DEFAULT_PVE_ROUND_LIMIT,
            pvp_round_limit: DEFAULT_PVP_ROUND_LIMIT,
            elemental_bonus: DEFAULT_ELEMENTAL_BONUS,
            fights_per_hour: DEFAULT_FIGHTS_PER_HOUR,
            fights_per_day: DEFAULT_FIGHTS_PER_DAY,
        }
    }
}

impl BattleConfig {
    /// Load from YAML (`.yaml`/`.yml`) or JSON (anything else). Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if is_yaml_path(path) {
            Ok(serde_yaml::from_str(&raw)?)
        } else {
            Ok(serde_json::from_str(&raw)?)
        }
    }
}

pub(crate) fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reward period. Unknown strings parse to `None` and yield zero rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Hourly,
    Daily,
}

impl Period {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }

    pub fn fights(self, config: &BattleConfig) -> f64 {
        match self {
            Self::Hourly => config.fights_per_hour,
            Self::Daily => config.fights_per_day,
        }
    }
}
