pub mod config;
pub mod engine;
pub mod export_csv;
pub mod pve;
pub mod pvp;
pub mod rng;

pub use config::{BattleConfig, Period};
pub use engine::{
    apply_damage, apply_damage_chain, hit_chance, resolve_attack, AttackReport, Strike, Striker,
};
pub use export_csv::{fight_records_to_csv, write_fight_records};
pub use pve::{elemental_bonus, Battle, FightRecord, PveOutcome};
pub use pvp::{duel, Contender, DuelResult, PvPBattle, PvpOutcome, PvpTally, Side, SquadEntry};
pub use rng::{RandomSource, Rng, SequenceRng};
