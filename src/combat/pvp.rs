//! PvP orchestrator: ranked brackets of squads dueling until one side runs out.
//!
//! Within a duel, excess damage from a strike pierces through the defending squad
//! in lineup order via [apply_damage_chain].

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::combat::config::BattleConfig;
use crate::combat::engine::{apply_damage_chain, resolve_attack};
use crate::combat::rng::{RandomSource, Rng};
use crate::data::clone_unit::CloneModifiers;
use crate::data::import::parse_squad_json;
use crate::data::player::Player;
use crate::data::squad::CloneSquad;
use crate::error::{ConfigError, LoadError};

/// One player entering a bracket, with optional per-clone modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadEntry {
    pub player: Player,
    pub modifiers: Option<Vec<CloneModifiers>>,
}

impl SquadEntry {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            modifiers: None,
        }
    }

    pub fn with_modifiers(player: Player, modifiers: Vec<CloneModifiers>) -> Self {
        Self {
            player,
            modifiers: Some(modifiers),
        }
    }
}

/// A ranked bracket slot: the player and the squad built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Contender {
    pub player: Player,
    pub squad: CloneSquad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attackers,
    Defenders,
}

/// Result of a single squad-vs-squad duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelResult {
    /// The side with no living clones left; `None` is a draw (round limit hit).
    pub exhausted: Option<Side>,
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PvpOutcome {
    AttackersWon,
    DefendersWon,
    Draw,
}

impl fmt::Display for PvpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AttackersWon => "Attackers won!",
            Self::DefendersWon => "Defenders won!",
            Self::Draw => "Draw!",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PvpTally {
    pub fights: u32,
    pub attackers_won: u32,
    pub defenders_won: u32,
    pub draws: u32,
}

impl PvpTally {
    pub fn record(&mut self, outcome: PvpOutcome) {
        self.fights += 1;
        match outcome {
            PvpOutcome::AttackersWon => self.attackers_won += 1,
            PvpOutcome::DefendersWon => self.defenders_won += 1,
            PvpOutcome::Draw => self.draws += 1,
        }
    }

    pub fn attacker_win_rate(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            f64::from(self.attackers_won) / f64::from(self.fights)
        }
    }
}

pub struct PvPBattle<R: RandomSource = Rng> {
    attackers: Vec<Contender>,
    defenders: Vec<Contender>,
    config: BattleConfig,
    rng: R,
    is_over: bool,
    current_round: u32,
    current_attacker: usize,
    current_defender: usize,
}

impl PvPBattle<Rng> {
    /// Default config and an entropy-seeded RNG.
    pub fn new(attackers: Vec<SquadEntry>, defenders: Vec<SquadEntry>) -> Result<Self, ConfigError> {
        Self::with_rng(attackers, defenders, BattleConfig::default(), Rng::from_entropy())
    }
}

impl<R: RandomSource> PvPBattle<R> {
    pub fn with_rng(
        attackers: Vec<SquadEntry>,
        defenders: Vec<SquadEntry>,
        config: BattleConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let attackers = rank_contenders(attackers)?;
        let defenders = rank_contenders(defenders)?;
        debug!(
            attackers = attackers.len(),
            defenders = defenders.len(),
            "PvP bracket prepared"
        );
        Ok(Self {
            attackers,
            defenders,
            config,
            rng,
            is_over: false,
            current_round: 0,
            current_attacker: 0,
            current_defender: 0,
        })
    }

    /// Build a bracket from two squad-import JSON documents.
    pub fn from_json(
        attackers_json: &str,
        defenders_json: &str,
        config: BattleConfig,
        rng: R,
    ) -> Result<Self, LoadError> {
        let attackers = parse_squad_json(attackers_json)?;
        let defenders = parse_squad_json(defenders_json)?;
        Ok(Self::with_rng(attackers, defenders, config, rng)?)
    }

    pub fn attackers(&self) -> &[Contender] {
        &self.attackers
    }

    pub fn defenders(&self) -> &[Contender] {
        &self.defenders
    }

    pub fn current_attacker(&self) -> usize {
        self.current_attacker
    }

    pub fn current_defender(&self) -> usize {
        self.current_defender
    }

    /// Total duel rounds fought since construction or the last reset.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Run the bracket: the losing squad of each duel is replaced by the next in rank.
    pub fn fight(&mut self) -> PvpOutcome {
        while self.current_attacker < self.attackers.len()
            && self.current_defender < self.defenders.len()
        {
            let attacker = &mut self.attackers[self.current_attacker];
            let defender = &mut self.defenders[self.current_defender];
            debug!(
                attacker = attacker.player.name(),
                defender = defender.player.name(),
                "duel"
            );
            let result = duel(
                &mut self.rng,
                &mut attacker.squad,
                &mut defender.squad,
                self.config.pvp_round_limit,
            );
            self.current_round += result.rounds;

            match result.exhausted {
                Some(Side::Attackers) => self.current_attacker += 1,
                Some(Side::Defenders) => self.current_defender += 1,
                None => {
                    self.current_attacker += 1;
                    self.current_defender += 1;
                }
            }

            if !any_alive_from(&self.attackers, self.current_attacker)
                || !any_alive_from(&self.defenders, self.current_defender)
            {
                break;
            }
        }

        self.is_over = true;
        let attackers_left = any_alive_from(&self.attackers, self.current_attacker);
        let defenders_left = any_alive_from(&self.defenders, self.current_defender);
        let outcome = match (attackers_left, defenders_left) {
            (true, false) => PvpOutcome::AttackersWon,
            (false, true) => PvpOutcome::DefendersWon,
            _ => PvpOutcome::Draw,
        };
        debug!(%outcome, rounds = self.current_round, "PvP battle finished");
        outcome
    }

    pub fn reset(&mut self) {
        for contender in self.attackers.iter_mut().chain(self.defenders.iter_mut()) {
            contender.squad.reset();
        }
        self.is_over = false;
        self.current_round = 0;
        self.current_attacker = 0;
        self.current_defender = 0;
    }

    pub fn repeat_fights(&mut self, fights: u32) -> PvpTally {
        let mut tally = PvpTally::default();
        for _ in 0..fights {
            let outcome = self.fight();
            tally.record(outcome);
            self.reset();
        }
        tally
    }
}

fn rank_contenders(entries: Vec<SquadEntry>) -> Result<Vec<Contender>, ConfigError> {
    let mut contenders = entries
        .into_iter()
        .map(|entry| {
            let squad = CloneSquad::new(&entry.player, entry.modifiers.as_deref())?;
            Ok(Contender {
                player: entry.player,
                squad,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    // Stable: equal precision keeps input order.
    contenders.sort_by(|a, b| {
        b.player
            .precision_before_boost()
            .total_cmp(&a.player.precision_before_boost())
    });

    Ok(contenders
        .into_iter()
        .map(|Contender { player, squad }| {
            let squad = squad.with_owner_prefix(player.name());
            Contender { player, squad }
        })
        .collect())
}

fn any_alive_from(contenders: &[Contender], cursor: usize) -> bool {
    contenders
        .iter()
        .skip(cursor)
        .any(|contender| contender.squad.any_alive())
}

/// Fight two squads until one has no living clones or `round_limit` rounds pass.
/// Defenders strike first each round.
pub fn duel<R: RandomSource + ?Sized>(
    rng: &mut R,
    attackers: &mut CloneSquad,
    defenders: &mut CloneSquad,
    round_limit: u32,
) -> DuelResult {
    let mut rounds = 0;
    while attackers.any_alive() && defenders.any_alive() && rounds < round_limit {
        volley(&mut *rng, defenders, attackers);
        volley(&mut *rng, attackers, defenders);
        rounds += 1;
        trace!(rounds, "duel round finished");
    }

    let exhausted = match (attackers.any_alive(), defenders.any_alive()) {
        (true, false) => Some(Side::Defenders),
        (false, true) => Some(Side::Attackers),
        _ => None,
    };
    DuelResult { exhausted, rounds }
}

/// Every living clone of `strikers` attacks a uniformly random living clone of `targets`.
fn volley<R: RandomSource + ?Sized>(rng: &mut R, strikers: &mut CloneSquad, targets: &mut CloneSquad) {
    for striker in strikers.clones.iter_mut() {
        if !striker.is_alive() {
            continue;
        }
        let living = targets.living_indices();
        if living.is_empty() {
            break;
        }
        let pick = ((rng.next_f64() * living.len() as f64) as usize).min(living.len() - 1);
        let target_index = living[pick];
        let evasion = targets.clones[target_index].evasion();

        let report = resolve_attack(&mut *rng, &striker.striker(), evasion, 0.0, |strike| {
            let delivered = apply_damage_chain(&mut targets.clones, target_index, strike.damage);
            debug!(
                attacker = striker.display_name(),
                defender = targets.clones[target_index].display_name(),
                damage = strike.damage,
                delivered,
                critical = strike.critical,
                dual = strike.dual,
                "hit"
            );
        });
        striker.hit_counter += report.hits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::SequenceRng;
    use crate::data::player::{Mode, PlayerConfig};

    fn pvp_player(name: &str, precision: f64, n_clones: u32) -> Player {
        Player::new(PlayerConfig {
            name: name.to_string(),
            precision,
            evasion: 10.0,
            hull: 1.0,
            power: 1.0,
            n_clones,
            mode: Mode::Pvp,
            ..PlayerConfig::default()
        })
    }

    #[test]
    fn contenders_are_ranked_by_raw_precision_with_stable_ties() {
        let battle = PvPBattle::with_rng(
            vec![
                SquadEntry::new(pvp_player("low", 10.0, 1)),
                SquadEntry::new(pvp_player("tie-a", 50.0, 1)),
                SquadEntry::new(pvp_player("high", 90.0, 1)),
                SquadEntry::new(pvp_player("tie-b", 50.0, 1)),
            ],
            vec![SquadEntry::new(pvp_player("solo", 1.0, 1))],
            BattleConfig::default(),
            SequenceRng::constant(0.5),
        )
        .expect("bracket");
        let order: Vec<_> = battle.attackers().iter().map(|c| c.player.name()).collect();
        assert_eq!(order, ["high", "tie-a", "tie-b", "low"]);
        assert_eq!(
            battle.attackers()[0].squad.clones[0].display_name(),
            "high Clone 1"
        );
    }

    #[test]
    fn bad_modifier_list_fails_the_whole_bracket() {
        let result = PvPBattle::with_rng(
            vec![SquadEntry::with_modifiers(
                pvp_player("a", 10.0, 2),
                vec![CloneModifiers::default()],
            )],
            vec![SquadEntry::new(pvp_player("d", 10.0, 1))],
            BattleConfig::default(),
            SequenceRng::constant(0.5),
        );
        assert!(matches!(
            result,
            Err(ConfigError::ModifierCountMismatch { clones: 2, modifiers: 1, .. })
        ));
    }

    #[test]
    fn duel_round_limit_yields_draw() {
        // Zero precision on both sides: nobody can hit.
        let mut a = CloneSquad::new(&pvp_player("a", 0.0, 1), None).expect("squad");
        let mut d = CloneSquad::new(&pvp_player("d", 0.0, 1), None).expect("squad");
        let mut rng = SequenceRng::constant(0.0);
        let result = duel(&mut rng, &mut a, &mut d, 200);
        assert_eq!(result, DuelResult { exhausted: None, rounds: 200 });
    }

    #[test]
    fn tally_counts_outcomes() {
        let mut tally = PvpTally::default();
        tally.record(PvpOutcome::AttackersWon);
        tally.record(PvpOutcome::Draw);
        assert_eq!(tally.fights, 2);
        assert_eq!(tally.attacker_win_rate(), 0.5);
        assert_eq!(PvpOutcome::DefendersWon.to_string(), "Defenders won!");
    }
}
