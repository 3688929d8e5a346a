use crate::data::clone_unit::{CloneModifiers, CloneUnit};
use crate::data::player::Player;
use crate::error::ConfigError;

/// Ordered clones belonging to one player. Order is fixed at construction and
/// defeated clones stay in place with zero hit points.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneSquad {
    pub clones: Vec<CloneUnit>,
}

impl CloneSquad {
    pub fn new(player: &Player, modifiers: Option<&[CloneModifiers]>) -> Result<Self, ConfigError> {
        let n_clones = player.n_clones();
        if let Some(list) = modifiers {
            if list.len() != n_clones as usize {
                return Err(ConfigError::ModifierCountMismatch {
                    player: player.name().to_string(),
                    clones: n_clones,
                    modifiers: list.len(),
                });
            }
        }

        let clones = (0..n_clones as usize)
            .map(|i| CloneUnit::new(player, modifiers.map(|list| &list[i]), i + 1))
            .collect();
        Ok(Self { clones })
    }

    /// Prefix every display name with the owning player's name.
    pub fn with_owner_prefix(mut self, owner: &str) -> Self {
        for clone in &mut self.clones {
            clone.set_owner(owner);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    pub fn living_indices(&self) -> Vec<usize> {
        self.clones
            .iter()
            .enumerate()
            .filter(|(_, clone)| clone.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.clones.iter().filter(|clone| clone.is_alive()).count()
    }

    pub fn any_alive(&self) -> bool {
        self.clones.iter().any(CloneUnit::is_alive)
    }

    /// True when no clone has hit points left (also true for an empty squad).
    pub fn is_exhausted(&self) -> bool {
        !self.any_alive()
    }

    pub fn total_hits(&self) -> u32 {
        self.clones.iter().map(|clone| clone.hit_counter).sum()
    }

    pub fn reset(&mut self) {
        for clone in &mut self.clones {
            clone.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::player::PlayerConfig;

    fn player(n_clones: u32) -> Player {
        Player::new(PlayerConfig {
            name: "Vasquez".to_string(),
            precision: 50.0,
            hull: 10.0,
            power: 2.0,
            n_clones,
            ..PlayerConfig::default()
        })
    }

    #[test]
    fn builds_one_clone_per_configured_count() {
        let squad = CloneSquad::new(&player(4), None).expect("no modifiers");
        assert_eq!(squad.len(), 4);
        let names: Vec<_> = squad.clones.iter().map(CloneUnit::name).collect();
        assert_eq!(names, ["Clone 1", "Clone 2", "Clone 3", "Clone 4"]);
        assert!(squad.clones.iter().all(|c| c.crit_chance() == 0.0));
    }

    #[test]
    fn modifier_count_mismatch_is_rejected() {
        let mods = vec![CloneModifiers::default(); 2];
        let err = CloneSquad::new(&player(3), Some(&mods)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ModifierCountMismatch {
                player: "Vasquez".to_string(),
                clones: 3,
                modifiers: 2,
            }
        );
        assert!(err.to_string().contains("number of clones (3)"));
    }

    #[test]
    fn modifiers_are_applied_in_order() {
        let mods = vec![
            CloneModifiers::new(0.1, 0.5, 0.0),
            CloneModifiers::new(0.2, 0.0, 0.3),
        ];
        let squad = CloneSquad::new(&player(2), Some(&mods)).expect("matching length");
        assert_eq!(squad.clones[0].crit_chance(), 0.1);
        assert_eq!(squad.clones[0].crit_dmg(), 0.5);
        assert_eq!(squad.clones[1].dual_shot_chance(), 0.3);
    }

    #[test]
    fn owner_prefix_only_touches_display_name() {
        let squad = CloneSquad::new(&player(1), None)
            .expect("squad")
            .with_owner_prefix("Hicks");
        assert_eq!(squad.clones[0].name(), "Clone 1");
        assert_eq!(squad.clones[0].display_name(), "Hicks Clone 1");
    }

    #[test]
    fn reset_restores_hit_points_and_counters() {
        let mut squad = CloneSquad::new(&player(2), None).expect("squad");
        squad.clones[0].current_hp = 0.0;
        squad.clones[1].hit_counter = 5;
        assert_eq!(squad.living_indices(), vec![1]);
        squad.reset();
        assert_eq!(squad.living_count(), 2);
        assert_eq!(squad.total_hits(), 0);
    }
}
