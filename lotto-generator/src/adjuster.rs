use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::RngExt;

use lotto_data::models::{Parity, PICK_COUNT, POOL_SIZE};

/// Rejection-sampling attempts before falling back to an explicit pick from
/// the unused numbers.
pub const MAX_REDRAWS: usize = 64;

/// Forces a raw candidate into six distinct sorted numbers with exactly
/// `target_evens` even members.
pub fn adjust(raw: &[u8], target_evens: usize, rng: &mut StdRng) -> Result<[u8; PICK_COUNT]> {
    if target_evens > PICK_COUNT {
        bail!("Liczba parzystych {} przekracza {}", target_evens, PICK_COUNT);
    }

    let mut numbers: Vec<u8> = Vec::with_capacity(PICK_COUNT);
    for &n in raw {
        if !(1..=POOL_SIZE).contains(&n) {
            log::warn!("Pominięto liczbę spoza zakresu: {}", n);
            continue;
        }
        if !numbers.contains(&n) {
            numbers.push(n);
        }
    }

    while numbers.len() < PICK_COUNT {
        let n = draw_fresh(&numbers, None, rng)?;
        numbers.push(n);
    }

    if numbers.len() > PICK_COUNT {
        numbers.shuffle(rng);
        numbers.truncate(PICK_COUNT);
    }

    balance_parity(&mut numbers, target_evens, rng)?;

    let mut out = [0u8; PICK_COUNT];
    out.copy_from_slice(&numbers);
    out.sort_unstable();
    Ok(out)
}

fn balance_parity(numbers: &mut Vec<u8>, target_evens: usize, rng: &mut StdRng) -> Result<()> {
    let evens = numbers.iter().filter(|&&n| Parity::Even.matches(n)).count();
    if evens == target_evens {
        return Ok(());
    }

    let (majority, excess) = if evens > target_evens {
        (Parity::Even, evens - target_evens)
    } else {
        (Parity::Odd, target_evens - evens)
    };
    let minority = majority.opposite();

    let mut victims: Vec<u8> = numbers.iter().copied().filter(|&n| majority.matches(n)).collect();
    victims.shuffle(rng);
    victims.truncate(excess);

    for victim in victims {
        numbers.retain(|&n| n != victim);
        // the removed number is of the wrong parity, so it cannot come back
        let replacement = draw_fresh(numbers, Some(minority), rng)?;
        log::debug!("Parzystość: {} -> {}", victim, replacement);
        numbers.push(replacement);
    }
    Ok(())
}

/// Uniform number in 1..=49 not in `present`, optionally of a given parity.
fn draw_fresh(present: &[u8], parity: Option<Parity>, rng: &mut StdRng) -> Result<u8> {
    let fits = |n: u8| !present.contains(&n) && parity.map_or(true, |p| p.matches(n));

    for _ in 0..MAX_REDRAWS {
        let n: u8 = rng.random_range(1..=POOL_SIZE);
        if fits(n) {
            return Ok(n);
        }
    }

    let candidates: Vec<u8> = (1..=POOL_SIZE).filter(|&n| fits(n)).collect();
    if candidates.is_empty() {
        bail!("Wyczerpano pulę liczb (parzystość: {:?})", parity);
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}
