//! Squad import format used to build PvP brackets from serialized data.
//!
//! ```json
//! { "squad": [ { "name": "Kane", "power": 10, "precision": 120, "evasion": 80,
//!                "hull": 40, "weapon_dmg": 25, "shield_def": 30, "n_clones": 2,
//!                "pvp_boost": 0.1,
//!                "clone_modifiers": [ { "crit_chance": 0.2 }, { "dual_shot_chance": 0.1 } ] } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::combat::pvp::SquadEntry;
use crate::data::clone_unit::CloneModifiers;
use crate::data::player::{Mode, Player, PlayerConfig};
use crate::error::LoadError;

fn default_name() -> String {
    "Player".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadFile {
    pub squad: Vec<ImportedPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedPlayer {
    #[serde(default = "default_name")]
    pub name: String,
    pub power: f64,
    pub precision: f64,
    pub evasion: f64,
    pub hull: f64,
    pub weapon_dmg: f64,
    pub shield_def: f64,
    pub n_clones: u32,
    #[serde(default)]
    pub pvp_boost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_modifiers: Option<Vec<CloneModifiers>>,
}

impl ImportedPlayer {
    /// Imported players always fight in PvP mode without VIP status.
    pub fn into_entry(self) -> SquadEntry {
        let player = Player::new(PlayerConfig {
            name: self.name,
            power: self.power,
            precision: self.precision,
            evasion: self.evasion,
            hull: self.hull,
            available: true,
            weapon_dmg: self.weapon_dmg,
            shield_def: self.shield_def,
            n_clones: self.n_clones,
            vip_status: false,
            mode: Mode::Pvp,
            pvp_boost: self.pvp_boost,
            ..PlayerConfig::default()
        });
        SquadEntry {
            player,
            modifiers: self.clone_modifiers,
        }
    }
}

pub fn parse_squad_json(json: &str) -> Result<Vec<SquadEntry>, LoadError> {
    let file: SquadFile = serde_json::from_str(json)?;
    Ok(file
        .squad
        .into_iter()
        .map(ImportedPlayer::into_entry)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_with_defaults() {
        let json = r#"{"squad": [
            {"power": 1, "precision": 2, "evasion": 3, "hull": 4,
             "weapon_dmg": 5, "shield_def": 6, "n_clones": 2,
             "clone_modifiers": [{"crit_chance": 0.5}, {}]}
        ]}"#;
        let entries = parse_squad_json(json).expect("valid squad");
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.player.name(), "Player");
        assert_eq!(entry.player.mode(), Mode::Pvp);
        assert!(!entry.player.vip_status());
        assert_eq!(
            entry.modifiers,
            Some(vec![
                CloneModifiers::new(0.5, 0.0, 0.0),
                CloneModifiers::default()
            ])
        );
    }

    #[test]
    fn missing_modifiers_stay_unset() {
        let json = r#"{"squad": [{"name": "Bishop", "power": 0, "precision": 0, "evasion": 0,
            "hull": 0, "weapon_dmg": 0, "shield_def": 0, "n_clones": 3, "pvp_boost": 0.2}]}"#;
        let entries = parse_squad_json(json).expect("valid squad");
        assert_eq!(entries[0].modifiers, None);
        assert_eq!(entries[0].player.serialize().pvp_boost, 0.2);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = parse_squad_json("{\"squad\": [{}]}").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
