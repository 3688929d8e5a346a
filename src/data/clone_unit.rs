//! A single combat unit ("clone") generated from a player's derived stats.

use serde::{Deserialize, Serialize};

use crate::combat::engine::Striker;
use crate::data::player::Player;

/// Per-clone overrides. Missing fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CloneModifiers {
    #[serde(default)]
    pub crit_chance: f64,
    #[serde(default)]
    pub crit_dmg: f64,
    #[serde(default)]
    pub dual_shot_chance: f64,
}

impl CloneModifiers {
    pub fn new(crit_chance: f64, crit_dmg: f64, dual_shot_chance: f64) -> Self {
        Self {
            crit_chance,
            crit_dmg,
            dual_shot_chance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneUnit {
    name: String,
    display_name: String,
    hp: f64,
    pub current_hp: f64,
    precision: f64,
    evasion: f64,
    damage: f64,
    crit_chance: f64,
    crit_dmg: f64,
    dual_shot_chance: f64,
    pub hit_counter: u32,
}

impl CloneUnit {
    /// `index` is 1-based and only used for the default name.
    pub fn new(player: &Player, modifiers: Option<&CloneModifiers>, index: usize) -> Self {
        let stats = player.stats();
        let modifiers = modifiers.copied().unwrap_or_default();
        let name = format!("Clone {index}");
        let hp = stats.hit_points as f64;
        Self {
            display_name: name.clone(),
            name,
            hp,
            current_hp: hp,
            precision: stats.precision as f64,
            evasion: stats.evasion as f64,
            damage: stats.damage as f64,
            crit_chance: modifiers.crit_chance,
            crit_dmg: modifiers.crit_dmg,
            dual_shot_chance: modifiers.dual_shot_chance,
            hit_counter: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used in logs; may carry the owner's name as a prefix.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.display_name = format!("{owner} {}", self.name);
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn evasion(&self) -> f64 {
        self.evasion
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn crit_chance(&self) -> f64 {
        self.crit_chance
    }

    pub fn crit_dmg(&self) -> f64 {
        self.crit_dmg
    }

    pub fn dual_shot_chance(&self) -> f64 {
        self.dual_shot_chance
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn striker(&self) -> Striker {
        Striker::CombatUnit {
            precision: self.precision,
            damage: self.damage,
            crit_chance: self.crit_chance,
            crit_dmg: self.crit_dmg,
            dual_shot_chance: self.dual_shot_chance,
        }
    }

    pub fn reset(&mut self) {
        self.current_hp = self.hp;
        self.hit_counter = 0;
    }
}
