//! Batch distribution for parallel Monte Carlo.
//!
//! Splits a fight count into batches; each batch runs on its own [Battle] with its
//! own seeded [Rng], so no RNG state is shared between threads.

use rayon::prelude::*;
use tracing::debug;

use crate::combat::pve::Battle;
use crate::combat::rng::Rng;
use crate::data::scenario::PveScenario;
use crate::error::ConfigError;
use crate::parallel::pool::WorkerPool;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use clonecombat::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Estimate the squad's win chance over `fights` fights, spread across the pool.
/// Batch `i` is seeded with `seed + i`; the result is deterministic for a given
/// seed and batch count.
pub fn estimate_win_rate(
    scenario: &PveScenario,
    fights: usize,
    seed: u64,
    num_batches: usize,
    pool: &WorkerPool,
) -> Result<f64, ConfigError> {
    if fights == 0 {
        return Ok(0.0);
    }
    // Fail fast on configuration errors before spawning work.
    scenario.battle(Rng::new(seed))?;

    let ranges = batch_ranges(fights, num_batches.max(1));
    let wins = pool.install(|| {
        ranges
            .par_iter()
            .enumerate()
            .map(|(i, &(start, end))| {
                let rng = Rng::new(seed.wrapping_add(i as u64));
                run_batch(scenario, rng, end - start)
            })
            .sum::<Result<usize, ConfigError>>()
    })?;

    let win_rate = wins as f64 / fights as f64;
    debug!(fights, wins, win_rate, batches = ranges.len(), "parallel estimate finished");
    Ok(win_rate)
}

fn run_batch(scenario: &PveScenario, rng: Rng, fights: usize) -> Result<usize, ConfigError> {
    let mut battle: Battle<Rng> = scenario.battle(rng)?;
    let mut wins = 0;
    for _ in 0..fights {
        if battle.fight().squad_won() {
            wins += 1;
        }
        battle.reset();
    }
    Ok(wins)
}
