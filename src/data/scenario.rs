//! PvE scenario files: a player, a mob, optional clone modifiers and battle tuning.
//!
//! YAML (`.yaml`/`.yml`) or JSON, picked by file extension.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::config::{is_yaml_path, BattleConfig};
use crate::combat::pve::Battle;
use crate::combat::rng::RandomSource;
use crate::data::clone_unit::CloneModifiers;
use crate::data::mob::{Mob, MobConfig};
use crate::data::player::{Player, PlayerConfig};
use crate::error::{ConfigError, LoadError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PveScenario {
    pub player: PlayerConfig,
    pub mob: MobConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<CloneModifiers>>,
    #[serde(default)]
    pub config: BattleConfig,
}

impl PveScenario {
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn battle<R: RandomSource>(&self, rng: R) -> Result<Battle<R>, ConfigError> {
        Battle::with_rng(
            Player::new(self.player.clone()),
            Mob::new(self.mob.clone()),
            self.modifiers.as_deref(),
            self.config,
            rng,
        )
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<PveScenario, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    if is_yaml_path(path) {
        PveScenario::from_yaml(&raw)
    } else {
        PveScenario::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::Rng;

    const YAML: &str = r#"
player:
  name: Dallas
  power: 3
  precision: 120
  evasion: 40
  hull: 25
  weapon_dmg: 10
  shield_def: 5
  n_clones: 2
  weapon_ele1: fire
mob:
  name: Drone
  hp: 500
  precision: 30
  evasion: 20
  damage: 12
  level: 10
  weaknesses: [fire]
modifiers:
  - crit_chance: 0.1
  - dual_shot_chance: 0.2
config:
  pve_round_limit: 100
"#;

    #[test]
    fn yaml_scenario_builds_a_battle() {
        let scenario = PveScenario::from_yaml(YAML).expect("scenario parses");
        assert_eq!(scenario.config.pve_round_limit, 100);
        assert_eq!(scenario.config.pvp_round_limit, 200);
        let battle = scenario.battle(Rng::new(3)).expect("battle builds");
        assert_eq!(battle.squad().len(), 2);
        assert!((battle.total_damage_modifier() - 0.30).abs() < 1e-12);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_scenario("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
