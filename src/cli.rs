use std::fs;

use serde::Serialize;
use serde_json::json;

use crate::combat::{fight_records_to_csv, BattleConfig, Period, PvPBattle, Rng};
use crate::data::load_scenario;
use crate::parallel::{estimate_win_rate, WorkerPool};

const DEFAULT_FIGHTS: u32 = 1000;
const DEFAULT_SEED: u64 = 7;
const PARALLEL_BATCHES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pve,
    Pvp,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("pve") => Some(Command::Pve),
        Some("pvp") => Some(Command::Pvp),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Pve) => handle_pve(args),
        Some(Command::Pvp) => handle_pvp(args),
        None => {
            eprintln!("usage: clonecombat <pve|pvp> ...");
            2
        }
    }
}

#[derive(Debug, Serialize)]
struct PveReport {
    fights: u32,
    seed: u64,
    win_chance: f64,
    credits_per_hour: f64,
    credits_per_day: f64,
    experience_per_hour: f64,
    experience_per_day: f64,
    summary: String,
}

fn handle_pve(args: &[String]) -> i32 {
    let positional = positional_args(args, &["--csv"]);
    let Some(path) = positional.first() else {
        eprintln!("usage: clonecombat pve <scenario.(json|yaml)> [fights] [seed] [--table] [--csv <path>]");
        return 2;
    };
    let fights = parse_u32_arg(positional.get(1), "fights", DEFAULT_FIGHTS);
    let seed = parse_u64_arg(positional.get(2), "seed", DEFAULT_SEED);
    let as_table = args.iter().any(|arg| arg == "--table");
    let csv_path = flag_value(args, "--csv");

    let scenario = match load_scenario(path) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("failed to load scenario: {err}");
            return 1;
        }
    };
    let mut battle = match scenario.battle(Rng::new(seed)) {
        Ok(battle) => battle,
        Err(err) => {
            eprintln!("invalid scenario: {err}");
            return 1;
        }
    };

    let win_chance = if let Some(csv_path) = csv_path {
        let records = battle.run_trials(fights as usize);
        let csv = match fight_records_to_csv(&records) {
            Ok(csv) => csv,
            Err(err) => {
                eprintln!("failed to render fight records: {err}");
                return 1;
            }
        };
        if let Err(err) = fs::write(csv_path, csv) {
            eprintln!("failed to write {csv_path}: {err}");
            return 1;
        }
        let wins = records.iter().filter(|r| r.outcome.squad_won()).count();
        if records.is_empty() {
            0.0
        } else {
            wins as f64 / records.len() as f64
        }
    } else {
        match estimate_win_rate(
            &scenario,
            fights as usize,
            seed,
            PARALLEL_BATCHES,
            &WorkerPool::default(),
        ) {
            Ok(win_chance) => win_chance,
            Err(err) => {
                eprintln!("invalid scenario: {err}");
                return 1;
            }
        }
    };

    let report = PveReport {
        fights,
        seed,
        win_chance,
        credits_per_hour: battle.revenue(Period::Hourly, win_chance, 0.0, 0.0),
        credits_per_day: battle.revenue(Period::Daily, win_chance, 0.0, 0.0),
        experience_per_hour: battle.experience(Period::Hourly, win_chance, 0.0),
        experience_per_day: battle.experience(Period::Daily, win_chance, 0.0),
        summary: battle.revenue_summary(win_chance),
    };
    tracing::info!(fights, seed, win_chance, "PvE simulation finished");

    if as_table {
        println!("fights\tseed\twin_chance\tcredits_per_hour\texperience_per_hour");
        println!(
            "{}\t{}\t{:.6}\t{:.2}\t{:.2}",
            report.fights,
            report.seed,
            report.win_chance,
            report.credits_per_hour,
            report.experience_per_hour
        );
        0
    } else {
        print_json(&report)
    }
}

fn handle_pvp(args: &[String]) -> i32 {
    let positional = positional_args(args, &[]);
    let (Some(attackers_path), Some(defenders_path)) = (positional.first(), positional.get(1))
    else {
        eprintln!("usage: clonecombat pvp <attackers.json> <defenders.json> [fights] [seed]");
        return 2;
    };
    let fights = parse_u32_arg(positional.get(2), "fights", 100);
    let seed = parse_u64_arg(positional.get(3), "seed", DEFAULT_SEED);

    let read = |path: &str| {
        fs::read_to_string(path).map_err(|err| format!("failed to read {path}: {err}"))
    };
    let attackers_json = read(attackers_path.as_str());
    let defenders_json = read(defenders_path.as_str());
    let (attackers_json, defenders_json) = match (attackers_json, defenders_json) {
        (Ok(a), Ok(d)) => (a, d),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let mut battle = match PvPBattle::from_json(
        &attackers_json,
        &defenders_json,
        BattleConfig::default(),
        Rng::new(seed),
    ) {
        Ok(battle) => battle,
        Err(err) => {
            eprintln!("invalid squads: {err}");
            return 1;
        }
    };

    let tally = battle.repeat_fights(fights);
    tracing::info!(fights, seed, attackers_won = tally.attackers_won, "PvP simulation finished");
    print_json(&json!({
        "fights": tally.fights,
        "seed": seed,
        "attackers_won": tally.attackers_won,
        "defenders_won": tally.defenders_won,
        "draws": tally.draws,
        "attacker_win_rate": tally.attacker_win_rate(),
    }))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

/// Arguments after the subcommand, minus `--flags` and the values of `valued_flags`.
fn positional_args<'a>(args: &'a [String], valued_flags: &[&str]) -> Vec<&'a String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(2) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if valued_flags.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg);
    }
    out
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_u32_arg(raw: Option<&&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u64_arg(raw: Option<&&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
