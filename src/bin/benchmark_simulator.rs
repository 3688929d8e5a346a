//! Run the PvE simulator benchmark and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, fights_per_sec, fights_per_min, rounds_per_sec, rounds_per_fight).

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::time::Instant;

use clonecombat::combat::{Battle, BattleConfig, Rng};
use clonecombat::data::{CloneModifiers, Mob, MobConfig, Player, PlayerConfig};

// Run for at least this long or this many fights
const MIN_DURATION_MS: u128 = 2000;
const MIN_FIGHTS: u32 = 500;

fn main() -> ExitCode {
    let log = std::env::args().any(|a| a == "--log");

    let player = Player::new(PlayerConfig {
        name: "bench".to_string(),
        power: 40.0,
        precision: 300.0,
        evasion: 250.0,
        hull: 60.0,
        weapon_dmg: 120.0,
        shield_def: 80.0,
        n_clones: 5,
        weapon_ele1: Some("plasma".to_string()),
        ..PlayerConfig::default()
    });
    let mob = Mob::new(MobConfig {
        name: "bench mob".to_string(),
        hp: 250_000.0,
        precision: 280.0,
        evasion: 260.0,
        damage: 90.0,
        level: 40,
        weaknesses: vec!["plasma".to_string()],
    });
    let modifiers = vec![CloneModifiers::new(0.1, 0.5, 0.05); 5];

    let mut battle = match Battle::with_rng(
        player,
        mob,
        Some(&modifiers),
        BattleConfig::default(),
        Rng::new(7),
    ) {
        Ok(battle) => battle,
        Err(err) => {
            eprintln!("benchmark setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut fights: u32 = 0;
    let mut rounds: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || fights < MIN_FIGHTS {
        let _ = battle.fight();
        rounds += u64::from(battle.current_round());
        battle.reset();
        fights += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let fights_per_sec = fights as f64 / elapsed_secs;
    let fights_per_min = fights_per_sec * 60.0;
    let rounds_per_sec = rounds as f64 / elapsed_secs;
    let rounds_per_fight = rounds as f64 / fights as f64;

    println!("PvE simulator benchmark:");
    println!("  Fights:        {}", fights);
    println!("  Duration:      {:.2} s", elapsed_secs);
    println!("  Fights/s:      {:.2}", fights_per_sec);
    println!("  Fights/min:    {:.2}", fights_per_min);
    println!("  Rounds/s:      {:.2}", rounds_per_sec);
    println!("  Rounds/fight:  {:.2}", rounds_per_fight);

    if log {
        let path = "benchmark_log.csv";
        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("failed to open {path}: {err}");
                return ExitCode::FAILURE;
            }
        };
        let needs_header = file.metadata().map(|m| m.len() == 0).unwrap_or(true);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let result = (|| -> Result<(), csv::Error> {
            if needs_header {
                writer.write_record([
                    "date",
                    "fights_per_sec",
                    "fights_per_min",
                    "rounds_per_sec",
                    "rounds_per_fight",
                ])?;
            }
            writer.write_record([
                date,
                format!("{fights_per_sec:.4}"),
                format!("{fights_per_min:.4}"),
                format!("{rounds_per_sec:.4}"),
                format!("{rounds_per_fight:.2}"),
            ])?;
            writer.flush()?;
            Ok(())
        })();
        if let Err(err) = result {
            eprintln!("failed to append to {path}: {err}");
            return ExitCode::FAILURE;
        }
        println!("Appended to {}", path);
    }

    ExitCode::SUCCESS
}
