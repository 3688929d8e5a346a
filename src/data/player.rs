//! Player configuration and the derived combat stats every clone inherits.
//!
//! Derived stats are computed once in [Player::new] and never recomputed; squads and
//! battles read the cached values through the accessors below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Pve,
    Pvp,
}

fn default_name() -> String {
    "Player".to_string()
}

fn default_available() -> bool {
    true
}

/// `"None"` and the empty string both mean an empty element slot.
pub fn normalize_element(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty() && *value != "None")
}

/// Raw player inputs, as entered by the user or read from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub power: f64,
    pub precision: f64,
    pub evasion: f64,
    pub hull: f64,
    #[serde(default = "default_available")]
    pub available: bool,
    pub weapon_dmg: f64,
    pub shield_def: f64,
    pub n_clones: u32,
    #[serde(default)]
    pub vip_status: bool,
    #[serde(default)]
    pub weapon_ele1: Option<String>,
    #[serde(default)]
    pub weapon_ele2: Option<String>,
    #[serde(default)]
    pub shield_ele1: Option<String>,
    #[serde(default)]
    pub shield_ele2: Option<String>,
    #[serde(default)]
    pub battle_boost: f64,
    #[serde(default)]
    pub pvp_boost: f64,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub battling_weapon_boost: f64,
    #[serde(default)]
    pub battling_hull_boost: f64,
    #[serde(default)]
    pub battling_precision_boost: f64,
    #[serde(default)]
    pub battling_evasion_boost: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            power: 0.0,
            precision: 0.0,
            evasion: 0.0,
            hull: 0.0,
            available: true,
            weapon_dmg: 0.0,
            shield_def: 0.0,
            n_clones: 1,
            vip_status: false,
            weapon_ele1: None,
            weapon_ele2: None,
            shield_ele1: None,
            shield_ele2: None,
            battle_boost: 0.0,
            pvp_boost: 0.0,
            mode: Mode::Pve,
            battling_weapon_boost: 0.0,
            battling_hull_boost: 0.0,
            battling_precision_boost: 0.0,
            battling_evasion_boost: 0.0,
        }
    }
}

/// Combat-ready stats shared by every clone of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub precision: u64,
    pub evasion: u64,
    pub hit_points: u64,
    pub damage: u64,
}

impl DerivedStats {
    /// Floors and saturates: negative or NaN intermediates become 0.
    pub fn derive(config: &PlayerConfig) -> Self {
        let boost = match config.mode {
            Mode::Pvp => config.pvp_boost,
            Mode::Pve => config.battle_boost,
        };
        let clones = f64::from(config.n_clones);

        let precision = floor_to_u64(
            config.precision * (1.0 + boost) * (1.0 + config.battling_precision_boost),
        );
        let evasion =
            floor_to_u64(config.evasion * (1.0 + boost) * (1.0 + config.battling_evasion_boost));
        let mut hit_points = floor_to_u64(
            (7.0 * config.hull * (1.0 + config.battling_hull_boost) + config.shield_def)
                * (1.0 + boost),
        );
        let damage = floor_to_u64(
            ((7.0 * config.power * (1.0 + config.battling_weapon_boost) + config.weapon_dmg)
                * clones)
                * (1.0 + boost),
        );

        if config.mode == Mode::Pvp {
            hit_points = floor_to_u64(hit_points as f64 * 7.0 * clones);
        }

        Self {
            precision,
            evasion,
            hit_points,
            damage,
        }
    }
}

fn floor_to_u64(value: f64) -> u64 {
    // `as` saturates and maps NaN to 0.
    value.floor() as u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    config: PlayerConfig,
    stats: DerivedStats,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        let stats = DerivedStats::derive(&config);
        Self { config, stats }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn n_clones(&self) -> u32 {
        self.config.n_clones
    }

    pub fn vip_status(&self) -> bool {
        self.config.vip_status
    }

    /// Raw precision, used to seed PvP brackets.
    pub fn precision_before_boost(&self) -> f64 {
        self.config.precision
    }

    pub fn evasion_before_boost(&self) -> f64 {
        self.config.evasion
    }

    pub fn stats(&self) -> DerivedStats {
        self.stats
    }

    pub fn precision(&self) -> u64 {
        self.stats.precision
    }

    pub fn evasion(&self) -> u64 {
        self.stats.evasion
    }

    pub fn hit_points(&self) -> u64 {
        self.stats.hit_points
    }

    pub fn damage(&self) -> u64 {
        self.stats.damage
    }

    /// Weapon element slots `[ele1, ele2]`, unset slots as `None`.
    pub fn weapon_elements(&self) -> [Option<&str>; 2] {
        [
            normalize_element(self.config.weapon_ele1.as_deref()),
            normalize_element(self.config.weapon_ele2.as_deref()),
        ]
    }

    pub fn shield_elements(&self) -> [Option<&str>; 2] {
        [
            normalize_element(self.config.shield_ele1.as_deref()),
            normalize_element(self.config.shield_ele2.as_deref()),
        ]
    }

    /// The raw inputs this player was built from.
    pub fn serialize(&self) -> PlayerConfig {
        self.config.clone()
    }
}

impl From<PlayerConfig> for Player {
    fn from(config: PlayerConfig) -> Self {
        Self::new(config)
    }
}
