use std::fmt;

use serde::{Deserialize, Serialize};

use lotto_data::models::{find_runs, longest_run, Parity};

use crate::config::GeneratorConfig;
use crate::table::HotColdTable;

/// Lowest number counted as "high" (41-49).
pub const HIGH_NUMBER_START: u8 = 41;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    VeryGood,
    Good,
    Average,
    Weak,
}

impl Rating {
    pub fn from_points(points: u32) -> Self {
        match points {
            p if p >= 6 => Rating::Excellent,
            p if p >= 4 => Rating::VeryGood,
            3 => Rating::Good,
            2 => Rating::Average,
            _ => Rating::Weak,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Excellent => "DOSKONAŁY",
            Rating::VeryGood => "BARDZO DOBRY",
            Rating::Good => "DOBRY",
            Rating::Average => "ŚREDNI",
            Rating::Weak => "SŁABY",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub numbers: Vec<u8>,
    pub sum: u32,
    pub even_count: usize,
    pub longest_run: usize,
    pub runs: Vec<(u8, u8)>,
    pub high_count: usize,
    pub hot_hits: usize,
    pub points: u32,
    pub rating: Rating,
}

/// Ad hoc quality points; says nothing about the odds of winning.
pub fn score(numbers: &[u8], table: &HotColdTable, config: &GeneratorConfig) -> Score {
    let sum: u32 = numbers.iter().map(|&n| n as u32).sum();
    let even_count = numbers.iter().filter(|&&n| Parity::Even.matches(n)).count();
    let run = longest_run(numbers);
    let high_count = numbers.iter().filter(|&&n| n >= HIGH_NUMBER_START).count();
    let hot_hits = numbers.iter().filter(|&&n| table.is_hot(n)).count();

    let mut points = 0;

    let (lo, hi) = config.sum_range;
    let (loose_lo, loose_hi) = config.loose_sum_range;
    if (lo..=hi).contains(&sum) {
        points += 2;
    } else if (loose_lo..=loose_hi).contains(&sum) {
        points += 1;
    }

    if even_count == config.target_evens {
        points += 2;
    } else if even_count.abs_diff(config.target_evens) == 1 {
        points += 1;
    }

    if run >= 2 {
        points += 1;
    }

    if high_count <= config.max_high_numbers {
        points += 1;
    }

    if hot_hits >= config.min_hot_hits {
        points += 1;
    }

    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    Score {
        numbers: sorted,
        sum,
        even_count,
        longest_run: run,
        runs: find_runs(numbers),
        high_count,
        hot_hits,
        points,
        rating: Rating::from_points(points),
    }
}
