//! Estimate one PvE win rate sequentially and in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup

use std::process::ExitCode;
use std::time::Instant;

use clonecombat::combat::{BattleConfig, Rng};
use clonecombat::data::{MobConfig, PlayerConfig, PveScenario};
use clonecombat::parallel::{estimate_win_rate, WorkerPool};

const FIGHTS: u32 = 50_000;
const SEED: u64 = 12345;
const BATCHES: usize = 16;

fn scenario() -> PveScenario {
    PveScenario {
        player: PlayerConfig {
            name: "speedup".to_string(),
            power: 40.0,
            precision: 300.0,
            evasion: 250.0,
            hull: 60.0,
            weapon_dmg: 120.0,
            shield_def: 80.0,
            n_clones: 4,
            ..PlayerConfig::default()
        },
        mob: MobConfig {
            name: "speedup mob".to_string(),
            hp: 60_000.0,
            precision: 280.0,
            evasion: 260.0,
            damage: 400.0,
            level: 40,
            weaknesses: Vec::new(),
        },
        modifiers: None,
        config: BattleConfig::default(),
    }
}

fn main() -> ExitCode {
    let scenario = scenario();
    println!("Monte Carlo: {} fights, seed {}", FIGHTS, SEED);
    println!();

    // Sequential
    let t0 = Instant::now();
    let sequential = match scenario.battle(Rng::new(SEED)) {
        Ok(mut battle) => battle.repeat_fights(FIGHTS),
        Err(err) => {
            eprintln!("invalid scenario: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} fights/s)  win rate {:.4}",
        seq_ms,
        f64::from(FIGHTS) / elapsed_seq.as_secs_f64(),
        sequential
    );

    // Parallel
    let t0 = Instant::now();
    let parallel = match estimate_win_rate(
        &scenario,
        FIGHTS as usize,
        SEED,
        BATCHES,
        &WorkerPool::default(),
    ) {
        Ok(win_rate) => win_rate,
        Err(err) => {
            eprintln!("invalid scenario: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} fights/s)  win rate {:.4}",
        par_ms,
        f64::from(FIGHTS) / elapsed_par.as_secs_f64(),
        parallel
    );

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    // A single batch reuses the sequential seed, so it must reproduce the sequential estimate.
    match estimate_win_rate(&scenario, FIGHTS as usize, SEED, 1, &WorkerPool::with_workers(1)) {
        Ok(single) if (single - sequential).abs() < 1e-12 => {
            println!("(Single-batch estimate matches sequential)");
            ExitCode::SUCCESS
        }
        Ok(single) => {
            eprintln!("single-batch estimate {single} differs from sequential {sequential}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("invalid scenario: {err}");
            ExitCode::FAILURE
        }
    }
}
