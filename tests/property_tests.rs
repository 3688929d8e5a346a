use clonecombat::combat::{apply_damage_chain, Battle, BattleConfig, Rng};
use clonecombat::data::{
    CloneModifiers, CloneSquad, DerivedStats, Mob, MobConfig, Mode, Player, PlayerConfig,
};
use clonecombat::ConfigError;
use proptest::prelude::*;

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Pve), Just(Mode::Pvp)]
}

prop_compose! {
    fn player_config()(
        power in -50.0f64..500.0,
        precision in -50.0f64..1_000.0,
        evasion in -50.0f64..1_000.0,
        hull in -50.0f64..500.0,
        weapon_dmg in -50.0f64..500.0,
        shield_def in -50.0f64..500.0,
        n_clones in 0u32..8,
        battle_boost in -1.5f64..2.0,
        pvp_boost in -1.5f64..2.0,
        mode in mode(),
        hull_boost in -1.5f64..2.0,
    ) -> PlayerConfig {
        PlayerConfig {
            power,
            precision,
            evasion,
            hull,
            weapon_dmg,
            shield_def,
            n_clones,
            battle_boost,
            pvp_boost,
            mode,
            battling_hull_boost: hull_boost,
            ..PlayerConfig::default()
        }
    }
}

proptest! {
    #[test]
    fn derived_stats_are_pure(config in player_config()) {
        let first = Player::new(config.clone());
        let second = Player::new(config.clone());
        prop_assert_eq!(first.stats(), second.stats());
        prop_assert_eq!(first.stats(), DerivedStats::derive(&config));
        prop_assert_eq!(Player::new(first.serialize()).stats(), first.stats());
    }

    #[test]
    fn modifier_count_mismatch_never_builds_a_squad(
        n_clones in 0u32..10,
        modifiers in 0usize..10,
    ) {
        prop_assume!(modifiers != n_clones as usize);
        let player = Player::new(PlayerConfig {
            n_clones,
            ..PlayerConfig::default()
        });
        let list = vec![CloneModifiers::default(); modifiers];
        let result = CloneSquad::new(&player, Some(&list));
        let is_mismatch = matches!(result, Err(ConfigError::ModifierCountMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn overflow_never_exceeds_damage_and_fills_in_order(
        hp in prop::collection::vec(0.0f64..50.0, 1..6),
        start_seed in 0usize..6,
        damage in 0.0f64..300.0,
    ) {
        let player = Player::new(PlayerConfig {
            shield_def: 50.0,
            n_clones: hp.len() as u32,
            ..PlayerConfig::default()
        });
        let mut squad = CloneSquad::new(&player, None).expect("squad");
        for (clone, &value) in squad.clones.iter_mut().zip(&hp) {
            clone.current_hp = value;
        }
        let start = start_seed % hp.len();

        let delivered = apply_damage_chain(&mut squad.clones, start, damage);
        prop_assert!(delivered <= damage + 1e-9);

        let lost: Vec<f64> = hp
            .iter()
            .zip(&squad.clones)
            .map(|(before, clone)| before - clone.current_hp)
            .collect();
        let total_lost: f64 = lost.iter().sum();
        prop_assert!((total_lost - delivered).abs() <= 1e-9);

        for (i, &amount) in lost.iter().enumerate() {
            if i < start {
                prop_assert_eq!(amount, 0.0);
            }
            if i > start && amount > 0.0 {
                for earlier in &squad.clones[start..i] {
                    prop_assert_eq!(earlier.current_hp, 0.0);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn repeat_fights_is_a_probability(
        seed in any::<u64>(),
        fights in 1u32..20,
        mob_hp in 1.0f64..200.0,
        mob_precision in 0.0f64..200.0,
        mob_damage in 0.0f64..200.0,
    ) {
        let player = Player::new(PlayerConfig {
            precision: 100.0,
            evasion: 100.0,
            hull: 5.0,
            weapon_dmg: 20.0,
            n_clones: 2,
            ..PlayerConfig::default()
        });
        let mob = Mob::new(MobConfig {
            name: "prop".to_string(),
            hp: mob_hp,
            precision: mob_precision,
            evasion: 100.0,
            damage: mob_damage,
            level: 0,
            weaknesses: Vec::new(),
        });
        let mut battle =
            Battle::with_rng(player, mob, None, BattleConfig::default(), Rng::new(seed))
                .expect("battle");
        let win_rate = battle.repeat_fights(fights);
        prop_assert!((0.0..=1.0).contains(&win_rate));
    }
}
