use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const POOL_SIZE: u8 = 49;
pub const PICK_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub index: u32,
    pub date: NaiveDate,
    /// Always sorted ascending.
    pub numbers: [u8; PICK_COUNT],
}

impl Draw {
    pub fn sum(&self) -> u32 {
        self.numbers.iter().map(|&n| n as u32).sum()
    }

    pub fn even_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| Parity::of(n) == Parity::Even).count()
    }

    pub fn odd_count(&self) -> usize {
        PICK_COUNT - self.even_count()
    }

    pub fn longest_run(&self) -> usize {
        longest_run(&self.numbers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(n: u8) -> Self {
        if n % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    pub fn matches(&self, n: u8) -> bool {
        Parity::of(n) == *self
    }

    pub fn opposite(&self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    /// Draws since last seen (0 = most recent draw).
    pub gap: u32,
}

pub fn validate_numbers(numbers: &[u8]) -> Result<()> {
    if numbers.len() != PICK_COUNT {
        bail!("Oczekiwano {} liczb, otrzymano {}", PICK_COUNT, numbers.len());
    }
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Liczba {} poza zakresem (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Powtórzona liczba: {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Length of the longest run of consecutive integers. Input need not be sorted.
pub fn longest_run(numbers: &[u8]) -> usize {
    if numbers.is_empty() {
        return 0;
    }
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut best = 1;
    let mut current = 1;
    for w in sorted.windows(2) {
        if w[1] == w[0] + 1 {
            current += 1;
            best = best.max(current);
        } else {
            current = 1;
        }
    }
    best
}

/// Runs of at least two consecutive integers, as inclusive (start, end) pairs.
pub fn find_runs(numbers: &[u8]) -> Vec<(u8, u8)> {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs = Vec::new();
    let mut i = 0;
    while i + 1 < sorted.len() {
        if sorted[i + 1] == sorted[i] + 1 {
            let start = sorted[i];
            while i + 1 < sorted.len() && sorted[i + 1] == sorted[i] + 1 {
                i += 1;
            }
            runs.push((start, sorted[i]));
        }
        i += 1;
    }
    runs
}

/// Synthetic draws for tests, oldest first.
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let base = (i % 7) as u8;
            let mut numbers = [
                base * 6 + 1,
                base * 6 + 2,
                base * 6 + 4,
                base * 6 + 5,
                (base * 6 + 12) % POOL_SIZE + 1,
                (base * 6 + 30) % POOL_SIZE + 1,
            ];
            numbers.sort_unstable();
            Draw {
                index: i as u32 + 1,
                date: start + chrono::Duration::days(i as i64 * 3),
                numbers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: [u8; 6]) -> Draw {
        Draw {
            index: 1,
            date: NaiveDate::from_ymd_opt(1957, 1, 27).unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_validate_numbers_ok() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert!(validate_numbers(&[44, 45, 46, 47, 48, 49]).is_ok());
    }

    #[test]
    fn test_validate_numbers_out_of_range() {
        assert!(validate_numbers(&[0, 2, 3, 4, 5, 6]).is_err());
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 50]).is_err());
    }

    #[test]
    fn test_validate_numbers_wrong_count() {
        assert!(validate_numbers(&[1, 2, 3]).is_err());
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6, 7]).is_err());
    }

    #[test]
    fn test_validate_numbers_duplicate() {
        assert!(validate_numbers(&[1, 1, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_draw_sum_and_parity() {
        let d = draw([8, 12, 31, 39, 43, 45]);
        assert_eq!(d.sum(), 178);
        assert_eq!(d.even_count(), 2);
        assert_eq!(d.odd_count(), 4);
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run(&[1, 2, 3, 10, 20, 30]), 3);
        assert_eq!(longest_run(&[5, 10, 15, 20, 25, 30]), 1);
        assert_eq!(longest_run(&[31, 30, 7, 8, 1, 40]), 2);
        assert_eq!(longest_run(&[]), 0);
    }

    #[test]
    fn test_find_runs() {
        assert_eq!(find_runs(&[1, 2, 3, 10, 11, 30]), vec![(1, 3), (10, 11)]);
        assert!(find_runs(&[2, 4, 6, 8, 10, 12]).is_empty());
    }

    #[test]
    fn test_parity() {
        assert_eq!(Parity::of(2), Parity::Even);
        assert_eq!(Parity::of(49), Parity::Odd);
        assert!(Parity::Odd.matches(7));
        assert_eq!(Parity::Even.opposite(), Parity::Odd);
    }

    #[test]
    fn test_make_test_draws_valid() {
        for d in make_test_draws(50) {
            assert!(validate_numbers(&d.numbers).is_ok(), "{:?}", d.numbers);
        }
    }
}
