//! Attack resolution shared by the PvE and PvP orchestrators.
//!
//! Draw order per attack is fixed: hit, crit (unit hits only), dual-strike gate
//! (units with a dual-shot chance only), then hit and crit again for the dual strike.

use crate::combat::rng::RandomSource;
use crate::data::clone_unit::CloneUnit;

/// Who is striking. Mobs deal flat damage; combat units can crit and dual-strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Striker {
    Mob {
        precision: f64,
        damage: f64,
    },
    CombatUnit {
        precision: f64,
        damage: f64,
        crit_chance: f64,
        crit_dmg: f64,
        dual_shot_chance: f64,
    },
}

impl Striker {
    pub fn precision(&self) -> f64 {
        match *self {
            Self::Mob { precision, .. } | Self::CombatUnit { precision, .. } => precision,
        }
    }

    pub fn damage(&self) -> f64 {
        match *self {
            Self::Mob { damage, .. } | Self::CombatUnit { damage, .. } => damage,
        }
    }
}

/// One landed strike, handed to the caller to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f64,
    pub critical: bool,
    pub dual: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackReport {
    pub hits: u32,
    pub misses: u32,
    pub dual_triggered: bool,
}

/// `precision / (precision + evasion)`, or 0.0 when the sum is not positive.
pub fn hit_chance(precision: f64, evasion: f64) -> f64 {
    let total = precision + evasion;
    if total > 0.0 {
        precision / total
    } else {
        0.0
    }
}

/// Resolve one attack, including a possible dual strike.
///
/// `elemental_bonus` multiplies combat-unit damage as `(1 + bonus)`; pass 0.0 in PvP.
/// `land` is called once per landed strike, in order.
pub fn resolve_attack<R, F>(
    rng: &mut R,
    striker: &Striker,
    target_evasion: f64,
    elemental_bonus: f64,
    mut land: F,
) -> AttackReport
where
    R: RandomSource + ?Sized,
    F: FnMut(Strike),
{
    let chance = hit_chance(striker.precision(), target_evasion);
    let mut report = AttackReport::default();

    match roll_strike(rng, striker, chance, elemental_bonus, false) {
        Some(strike) => {
            report.hits += 1;
            land(strike);
        }
        None => report.misses += 1,
    }

    if let Striker::CombatUnit {
        dual_shot_chance, ..
    } = *striker
    {
        if dual_shot_chance > 0.0 && rng.next_f64() < dual_shot_chance {
            report.dual_triggered = true;
            match roll_strike(rng, striker, chance, elemental_bonus, true) {
                Some(strike) => {
                    report.hits += 1;
                    land(strike);
                }
                None => report.misses += 1,
            }
        }
    }

    report
}

fn roll_strike<R: RandomSource + ?Sized>(
    rng: &mut R,
    striker: &Striker,
    chance: f64,
    elemental_bonus: f64,
    dual: bool,
) -> Option<Strike> {
    if rng.next_f64() >= chance {
        return None;
    }
    match *striker {
        Striker::Mob { damage, .. } => Some(Strike {
            damage,
            critical: false,
            dual,
        }),
        Striker::CombatUnit {
            damage,
            crit_chance,
            crit_dmg,
            ..
        } => {
            let mut damage = damage;
            let critical = rng.next_f64() < crit_chance;
            if critical {
                damage *= 1.0 + crit_dmg;
            }
            damage *= 1.0 + elemental_bonus;
            Some(Strike {
                damage,
                critical,
                dual,
            })
        }
    }
}

/// Subtract `damage` from `current_hp`, flooring at zero.
pub fn apply_damage(current_hp: &mut f64, damage: f64) {
    *current_hp = (*current_hp - damage).max(0.0);
}

/// Apply `damage` starting at `units[start]`, carrying any excess to the next living
/// unit in index order. Nothing is delivered if `units[start]` is already exhausted.
/// Returns the damage actually absorbed.
pub fn apply_damage_chain(units: &mut [CloneUnit], start: usize, damage: f64) -> f64 {
    let mut remaining = damage;
    let mut delivered = 0.0;
    let mut target = Some(start).filter(|&i| i < units.len());

    while let Some(index) = target {
        let unit = &mut units[index];
        if remaining <= 0.0 || !unit.is_alive() {
            break;
        }
        let applied = remaining.min(unit.current_hp);
        apply_damage(&mut unit.current_hp, applied);
        remaining -= applied;
        delivered += applied;
        tracing::trace!(
            target_unit = unit.display_name(),
            applied,
            left = unit.current_hp,
            "damage applied"
        );
        if remaining <= 0.0 {
            break;
        }
        target = next_living_after(units, index);
    }

    delivered
}

fn next_living_after(units: &[CloneUnit], index: usize) -> Option<usize> {
    units
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, unit)| unit.is_alive())
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::SequenceRng;

    fn unit(damage: f64, crit_chance: f64, crit_dmg: f64, dual: f64) -> Striker {
        Striker::CombatUnit {
            precision: 100.0,
            damage,
            crit_chance,
            crit_dmg,
            dual_shot_chance: dual,
        }
    }

    #[test]
    fn hit_chance_guards_zero_denominator() {
        assert_eq!(hit_chance(0.0, 0.0), 0.0);
        assert_eq!(hit_chance(100.0, 0.0), 1.0);
        assert_eq!(hit_chance(30.0, 10.0), 0.75);
    }

    #[test]
    fn miss_has_no_effect() {
        let mut rng = SequenceRng::constant(0.99);
        let mut landed = Vec::new();
        let report = resolve_attack(&mut rng, &unit(10.0, 1.0, 1.0, 0.0), 100.0, 0.0, |s| {
            landed.push(s)
        });
        assert!(landed.is_empty());
        assert_eq!(report, AttackReport { hits: 0, misses: 1, dual_triggered: false });
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn crit_and_elemental_bonus_stack_multiplicatively() {
        let mut rng = SequenceRng::constant(0.0);
        let mut landed = Vec::new();
        resolve_attack(&mut rng, &unit(10.0, 0.5, 1.0, 0.0), 0.0, 0.3, |s| landed.push(s));
        assert_eq!(landed.len(), 1);
        assert!(landed[0].critical);
        assert!((landed[0].damage - 26.0).abs() < 1e-9);
    }

    #[test]
    fn mob_damage_is_flat() {
        let mob = Striker::Mob {
            precision: 10.0,
            damage: 7.0,
        };
        let mut rng = SequenceRng::constant(0.0);
        let mut landed = Vec::new();
        resolve_attack(&mut rng, &mob, 0.0, 0.6, |s| landed.push(s));
        assert_eq!(landed, vec![Strike { damage: 7.0, critical: false, dual: false }]);
        // Mobs never draw crit or dual-strike samples.
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn dual_strike_draws_independently_after_a_miss() {
        // primary miss, dual gate passes, dual hit, dual crit fails
        let mut rng = SequenceRng::new(vec![0.9, 0.1, 0.2, 0.8]);
        let mut landed = Vec::new();
        let report = resolve_attack(&mut rng, &unit(5.0, 0.5, 1.0, 0.5), 100.0, 0.0, |s| {
            landed.push(s)
        });
        assert_eq!(report, AttackReport { hits: 1, misses: 1, dual_triggered: true });
        assert_eq!(landed, vec![Strike { damage: 5.0, critical: false, dual: true }]);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn zero_dual_chance_never_draws_gate() {
        let mut rng = SequenceRng::constant(0.0);
        resolve_attack(&mut rng, &unit(5.0, 0.0, 0.0, 0.0), 0.0, 0.0, |_| {});
        // hit + crit
        assert_eq!(rng.draws(), 2);
    }
}
