//! PvE orchestrator: one squad against one mob, round by round, until someone drops.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::combat::config::{BattleConfig, Period};
use crate::combat::engine::{apply_damage, resolve_attack};
use crate::combat::rng::{RandomSource, Rng};
use crate::data::clone_unit::CloneModifiers;
use crate::data::mob::Mob;
use crate::data::player::Player;
use crate::data::squad::CloneSquad;
use crate::error::ConfigError;
use crate::format::format_number;

const CREDITS_PER_FIGHT: f64 = 300.0;
const EXP_PER_FIGHT: f64 = 20.0;
const VIP_MULTIPLIER: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PveOutcome {
    SquadWon { rounds: u32 },
    MobWon { rounds: u32 },
    /// The round limit was exceeded; counts as a loss for the squad.
    /// `rounds` is always `round_limit + 1`.
    Timeout { rounds: u32, round_limit: u32 },
}

impl PveOutcome {
    pub fn squad_won(&self) -> bool {
        matches!(self, Self::SquadWon { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SquadWon { .. } => "squad_won",
            Self::MobWon { .. } => "mob_won",
            Self::Timeout { .. } => "timeout",
        }
    }

    /// Rounds fought before the fight was decided.
    pub fn rounds(&self) -> u32 {
        match *self {
            Self::SquadWon { rounds } | Self::MobWon { rounds } | Self::Timeout { rounds, .. } => {
                rounds
            }
        }
    }
}

impl fmt::Display for PveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SquadWon { rounds } => write!(f, "Clones won after {rounds} rounds."),
            Self::MobWon { rounds } => write!(f, "Mob won after {rounds} rounds."),
            Self::Timeout { round_limit, .. } => write!(
                f,
                "Fight did not end after {round_limit} rounds, so mob wins!"
            ),
        }
    }
}

/// One scored fight, captured before the battle is reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightRecord {
    pub index: usize,
    pub outcome: PveOutcome,
    pub mob_hp_remaining: f64,
    pub squad_hits: u32,
    pub mob_hits: u32,
}

/// Sum of per-slot bonuses for weapon/shield elements the mob is weak to.
///
/// Each pair is mirrored first (an empty slot copies its partner), so a single
/// matching element can be credited in both slots of its pair.
pub fn elemental_bonus(player: &Player, mob: &Mob, per_slot: f64) -> f64 {
    let [weapon1, weapon2] = mirror_pair(player.weapon_elements());
    let [shield1, shield2] = mirror_pair(player.shield_elements());
    [weapon1, weapon2, shield1, shield2]
        .into_iter()
        .flatten()
        .filter(|element| mob.is_weak_to(element))
        .map(|_| per_slot)
        .sum()
}

fn mirror_pair([first, second]: [Option<&str>; 2]) -> [Option<&str>; 2] {
    let second = second.or(first);
    let first = first.or(second);
    [first, second]
}

pub struct Battle<R: RandomSource = Rng> {
    player: Player,
    squad: CloneSquad,
    mob: Mob,
    config: BattleConfig,
    rng: R,
    is_over: bool,
    current_round: u32,
    elemental_bonus: f64,
    credits_base: f64,
    exp_base: f64,
}

impl Battle<Rng> {
    /// Default config and an entropy-seeded RNG.
    pub fn new(
        player: Player,
        mob: Mob,
        modifiers: Option<&[CloneModifiers]>,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(
            player,
            mob,
            modifiers,
            BattleConfig::default(),
            Rng::from_entropy(),
        )
    }
}

impl<R: RandomSource> Battle<R> {
    pub fn with_rng(
        player: Player,
        mob: Mob,
        modifiers: Option<&[CloneModifiers]>,
        config: BattleConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let squad = CloneSquad::new(&player, modifiers)?;
        let elemental_bonus = elemental_bonus(&player, &mob, config.elemental_bonus);
        let vip = if player.vip_status() { VIP_MULTIPLIER } else { 1.0 };
        let level = f64::from(mob.level());
        let credits_base = CREDITS_PER_FIGHT * (1.0 + 0.1 * level) * vip;
        let exp_base = ((EXP_PER_FIGHT + (0.1 * level).floor()) * vip).floor();

        debug!(
            player = player.name(),
            mob = mob.name(),
            clones = squad.len(),
            elemental_bonus,
            "PvE battle prepared"
        );

        Ok(Self {
            player,
            squad,
            mob,
            config,
            rng,
            is_over: false,
            current_round: 0,
            elemental_bonus,
            credits_base,
            exp_base,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn squad(&self) -> &CloneSquad {
        &self.squad
    }

    pub fn mob(&self) -> &Mob {
        &self.mob
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn total_damage_modifier(&self) -> f64 {
        self.elemental_bonus
    }

    pub fn credits_base(&self) -> f64 {
        self.credits_base
    }

    pub fn exp_base(&self) -> f64 {
        self.exp_base
    }

    /// Mob strikes every living clone, then living clones strike the mob until it drops.
    pub fn do_one_round(&mut self) {
        trace!(round = self.current_round, "round start");

        let mob_striker = self.mob.striker();
        let mob_name = self.mob.name().to_string();
        for clone in self.squad.clones.iter_mut() {
            if !clone.is_alive() {
                continue;
            }
            let evasion = clone.evasion();
            let report = resolve_attack(&mut self.rng, &mob_striker, evasion, 0.0, |strike| {
                apply_damage(&mut clone.current_hp, strike.damage);
                debug!(
                    attacker = %mob_name,
                    defender = clone.display_name(),
                    damage = strike.damage,
                    left = clone.current_hp,
                    "hit"
                );
            });
            self.mob.hit_counter += report.hits;
        }

        let bonus = self.elemental_bonus;
        for clone in self.squad.clones.iter_mut() {
            if !clone.is_alive() {
                trace!(clone = clone.display_name(), "exhausted");
                continue;
            }
            if !self.mob.is_alive() {
                break;
            }
            let mob = &mut self.mob;
            let evasion = mob.evasion();
            let report = resolve_attack(&mut self.rng, &clone.striker(), evasion, bonus, |strike| {
                apply_damage(&mut mob.current_hp, strike.damage);
                debug!(
                    attacker = clone.display_name(),
                    defender = %mob_name,
                    damage = strike.damage,
                    critical = strike.critical,
                    dual = strike.dual,
                    left = mob.current_hp,
                    "hit"
                );
            });
            clone.hit_counter += report.hits;
        }

        self.is_over = !self.mob.is_alive() || self.squad.is_exhausted();
        self.current_round += 1;
    }

    /// Run rounds until the battle is decided or the round limit is exceeded.
    pub fn fight(&mut self) -> PveOutcome {
        let round_limit = self.config.pve_round_limit;
        while !self.is_over {
            self.do_one_round();
            if self.current_round > round_limit {
                break;
            }
        }

        if self.current_round > round_limit {
            PveOutcome::Timeout {
                rounds: self.current_round,
                round_limit,
            }
        } else if !self.mob.is_alive() {
            PveOutcome::SquadWon {
                rounds: self.current_round,
            }
        } else {
            PveOutcome::MobWon {
                rounds: self.current_round,
            }
        }
    }

    pub fn reset(&mut self) {
        self.mob.reset();
        self.squad.reset();
        self.is_over = false;
        self.current_round = 0;
    }

    /// Monte Carlo estimate of the squad's win chance over `fights` independent fights.
    pub fn repeat_fights(&mut self, fights: u32) -> f64 {
        if fights == 0 {
            return 0.0;
        }
        let mut wins = 0u32;
        for _ in 0..fights {
            if self.fight().squad_won() {
                wins += 1;
            }
            self.reset();
        }
        let win_rate = f64::from(wins) / f64::from(fights);
        debug!(fights, wins, win_rate, "repeat_fights finished");
        win_rate
    }

    /// Like [Battle::repeat_fights] but keeps a record of every fight.
    pub fn run_trials(&mut self, fights: usize) -> Vec<FightRecord> {
        (0..fights)
            .map(|index| {
                let outcome = self.fight();
                let record = FightRecord {
                    index,
                    outcome,
                    mob_hp_remaining: self.mob.current_hp,
                    squad_hits: self.squad.total_hits(),
                    mob_hits: self.mob.hit_counter,
                };
                self.reset();
                record
            })
            .collect()
    }

    /// Credits over `period` (`"hourly"` or `"daily"`); any other period yields 0.
    pub fn get_revenue(
        &self,
        period: &str,
        win_chance: f64,
        income_boost: f64,
        reputation: f64,
    ) -> f64 {
        Period::parse(period)
            .map(|period| self.revenue(period, win_chance, income_boost, reputation))
            .unwrap_or(0.0)
    }

    pub fn revenue(&self, period: Period, win_chance: f64, income_boost: f64, reputation: f64) -> f64 {
        let total_credits = self.credits_base * (1.0 + income_boost + reputation);
        total_credits * period.fights(&self.config) * win_chance
    }

    /// Experience over `period` (`"hourly"` or `"daily"`); any other period yields 0.
    pub fn get_experience(&self, period: &str, win_chance: f64, reputation: f64) -> f64 {
        Period::parse(period)
            .map(|period| self.experience(period, win_chance, reputation))
            .unwrap_or(0.0)
    }

    pub fn experience(&self, period: Period, win_chance: f64, reputation: f64) -> f64 {
        let exp = (self.exp_base * (1.0 + reputation)).floor();
        exp * period.fights(&self.config) * win_chance
    }

    pub fn revenue_summary(&self, win_chance: f64) -> String {
        let per_hour = self.revenue(Period::Hourly, win_chance, 0.0, 0.0);
        let per_day = 24.0 * per_hour;
        format!(
            "Credits per hour: {}/h\nCredits per day: {}/day",
            format_number(per_hour),
            format_number(per_day)
        )
    }
}
