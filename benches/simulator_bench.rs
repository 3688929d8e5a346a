//! Simulator throughput benchmarks: PvE fights and PvP brackets per second.
//!
//! Run with: `cargo bench --bench simulator`
//! Results show mean time per fight and throughput (fights/s).

use clonecombat::combat::{Battle, BattleConfig, PvPBattle, Rng, SquadEntry};
use clonecombat::data::{CloneModifiers, Mob, MobConfig, Mode, Player, PlayerConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn pve_player(n_clones: u32) -> Player {
    Player::new(PlayerConfig {
        name: "bench".to_string(),
        power: 40.0,
        precision: 300.0,
        evasion: 250.0,
        hull: 60.0,
        weapon_dmg: 120.0,
        shield_def: 80.0,
        n_clones,
        ..PlayerConfig::default()
    })
}

fn mob(hp: f64) -> Mob {
    Mob::new(MobConfig {
        name: "bench mob".to_string(),
        hp,
        precision: 280.0,
        evasion: 260.0,
        damage: 90.0,
        level: 40,
        weaknesses: Vec::new(),
    })
}

fn pvp_entry(name: &str, precision: f64) -> SquadEntry {
    SquadEntry::with_modifiers(
        Player::new(PlayerConfig {
            name: name.to_string(),
            power: 30.0,
            precision,
            evasion: 200.0,
            hull: 50.0,
            weapon_dmg: 90.0,
            shield_def: 60.0,
            n_clones: 3,
            mode: Mode::Pvp,
            pvp_boost: 0.1,
            ..PlayerConfig::default()
        }),
        vec![CloneModifiers::new(0.1, 0.5, 0.05); 3],
    )
}

fn bench_simulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    // Short fight: the squad usually wins within a few rounds
    group.bench_function("pve_short_fight", |b| {
        b.iter_batched(
            || {
                Battle::with_rng(pve_player(5), mob(5_000.0), None, BattleConfig::default(), Rng::new(7))
            },
            |battle| battle.map(|mut battle| black_box(battle.fight())),
            BatchSize::SmallInput,
        );
    });

    // Long fight: a tanky mob stretches the fight across many rounds
    group.bench_function("pve_long_fight", |b| {
        b.iter_batched(
            || {
                Battle::with_rng(pve_player(5), mob(500_000.0), None, BattleConfig::default(), Rng::new(7))
            },
            |battle| battle.map(|mut battle| black_box(battle.fight())),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("pvp_bracket_3v3", |b| {
        b.iter_batched(
            || {
                PvPBattle::with_rng(
                    vec![pvp_entry("a1", 300.0), pvp_entry("a2", 250.0), pvp_entry("a3", 200.0)],
                    vec![pvp_entry("d1", 310.0), pvp_entry("d2", 240.0), pvp_entry("d3", 190.0)],
                    BattleConfig::default(),
                    Rng::new(7),
                )
            },
            |battle| battle.map(|mut battle| black_box(battle.fight())),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_simulator);
criterion_main!(benches);
