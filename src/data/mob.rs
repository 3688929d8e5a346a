//! PvE adversary: a single stat block with elemental weaknesses.

use serde::{Deserialize, Serialize};

use crate::combat::engine::Striker;

fn default_mob_name() -> String {
    "Mob".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobConfig {
    #[serde(default = "default_mob_name")]
    pub name: String,
    pub hp: f64,
    pub precision: f64,
    pub evasion: f64,
    pub damage: f64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mob {
    config: MobConfig,
    pub current_hp: f64,
    pub hit_counter: u32,
}

impl Mob {
    pub fn new(config: MobConfig) -> Self {
        let current_hp = config.hp;
        Self {
            config,
            current_hp,
            hit_counter: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn hp(&self) -> f64 {
        self.config.hp
    }

    pub fn precision(&self) -> f64 {
        self.config.precision
    }

    pub fn evasion(&self) -> f64 {
        self.config.evasion
    }

    pub fn damage(&self) -> f64 {
        self.config.damage
    }

    pub fn level(&self) -> u32 {
        self.config.level
    }

    pub fn is_weak_to(&self, element: &str) -> bool {
        self.config.weaknesses.iter().any(|w| w == element)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn striker(&self) -> Striker {
        Striker::Mob {
            precision: self.config.precision,
            damage: self.config.damage,
        }
    }

    pub fn reset(&mut self) {
        self.current_hp = self.config.hp;
        self.hit_counter = 0;
    }

    pub fn config(&self) -> &MobConfig {
        &self.config
    }
}

impl From<MobConfig> for Mob {
    fn from(config: MobConfig) -> Self {
        Self::new(config)
    }
}
