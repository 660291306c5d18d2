use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::RngExt;

use lotto_data::models::POOL_SIZE;

use crate::table::HotColdTable;

/// Overlapping windows for the positional strategy, one pick each.
pub const POSITION_RANGES: [(u8, u8); 6] = [(1, 15), (10, 25), (15, 35), (20, 40), (30, 45), (35, 49)];

/// Four ten-wide bands covering 1-40; 41-49 is left out on purpose.
pub const DECADE_BANDS: [(u8, u8); 4] = [(1, 10), (11, 20), (21, 30), (31, 40)];

/// Up to `count` distinct values from `pool`, skipping anything in `chosen`.
/// Returns fewer when the pool runs dry; the adjuster pads later.
fn sample_from(pool: &[u8], count: usize, chosen: &[u8], rng: &mut StdRng) -> Vec<u8> {
    let mut available: Vec<u8> = pool.iter().copied().filter(|n| !chosen.contains(n)).collect();
    available.shuffle(rng);
    available.truncate(count);
    available
}

fn full_pool() -> Vec<u8> {
    (1..=POOL_SIZE).collect()
}

fn range(lo: u8, hi: u8) -> Vec<u8> {
    (lo..=hi).collect()
}

/// 4 hot + 2 from whatever is left.
pub fn hot(table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers = sample_from(table.hot(), 4, &[], rng);
    let rest = sample_from(&full_pool(), 2, &numbers, rng);
    numbers.extend(rest);
    numbers
}

/// 3 cold + 3 from whatever is left.
pub fn cold(table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers = sample_from(table.cold(), 3, &[], rng);
    let rest = sample_from(&full_pool(), 3, &numbers, rng);
    numbers.extend(rest);
    numbers
}

/// 2 hot + 2 cold + 2 neutral.
pub fn mixed(table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers = sample_from(table.hot(), 2, &[], rng);
    let cold = sample_from(table.cold(), 2, &numbers, rng);
    numbers.extend(cold);
    let neutral = sample_from(&table.neutral(), 2, &numbers, rng);
    numbers.extend(neutral);
    numbers
}

/// One pick per `POSITION_RANGES` window, sorted. Never goes through the adjuster.
pub fn positional(_table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers: Vec<u8> = Vec::with_capacity(POSITION_RANGES.len());
    for &(lo, hi) in &POSITION_RANGES {
        let pick = sample_from(&range(lo, hi), 1, &numbers, rng);
        match pick.first() {
            Some(&n) => numbers.push(n),
            None => {
                // window exhausted by earlier picks
                let pad = sample_from(&full_pool(), 1, &numbers, rng);
                numbers.extend(pad);
            }
        }
    }
    numbers.sort_unstable();
    numbers
}

/// A consecutive pair seeded in 1..=47, then 4 from the rest.
pub fn sequence(_table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let start: u8 = rng.random_range(1..=POOL_SIZE - 2);
    let mut numbers = vec![start, start + 1];
    let rest = sample_from(&full_pool(), 4, &numbers, rng);
    numbers.extend(rest);
    numbers
}

/// One from each of 1-10, 11-20, 21-30, 31-40, then 2 more from their union.
pub fn decade_balanced(_table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers = Vec::with_capacity(6);
    for &(lo, hi) in &DECADE_BANDS {
        let pick = sample_from(&range(lo, hi), 1, &numbers, rng);
        numbers.extend(pick);
    }
    let union = range(DECADE_BANDS[0].0, DECADE_BANDS[DECADE_BANDS.len() - 1].1);
    let rest = sample_from(&union, 2, &numbers, rng);
    numbers.extend(rest);
    numbers
}

/// 3 recently hot + 2 recently cold + 1 recently neutral.
pub fn recent_trend(table: &HotColdTable, rng: &mut StdRng) -> Vec<u8> {
    let mut numbers = sample_from(table.recent_hot(), 3, &[], rng);
    let cold = sample_from(table.recent_cold(), 2, &numbers, rng);
    numbers.extend(cold);
    let neutral = sample_from(&table.recent_neutral(), 1, &numbers, rng);
    numbers.extend(neutral);
    numbers
}
