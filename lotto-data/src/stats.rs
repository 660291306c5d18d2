use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{Draw, NumberStats, PICK_COUNT, POOL_SIZE};

/// Critical chi-square value for 48 degrees of freedom at alpha = 0.05.
pub const CHI_SQUARE_CRITICAL_005: f64 = 66.34;

pub const DECADE_LABELS: [&str; 5] = ["1-10", "11-20", "21-30", "31-40", "41-49"];

#[derive(Debug, Clone, PartialEq)]
pub struct SumSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSummary {
    pub with_pair: u32,
    pub with_triple: u32,
    pub longest: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquare {
    pub statistic: f64,
    pub degrees_of_freedom: u32,
    pub critical_005: f64,
    pub uniform: bool,
}

/// Draws are oldest first; gaps are counted back from the last one.
pub fn compute_stats(draws: &[Draw]) -> Vec<NumberStats> {
    let mut stats: Vec<NumberStats> = (1..=POOL_SIZE)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            gap: draws.len() as u32,
        })
        .collect();

    for (age, draw) in draws.iter().rev().enumerate() {
        for &n in &draw.numbers {
            let Some(stat) = n.checked_sub(1).and_then(|idx| stats.get_mut(idx as usize)) else {
                continue;
            };
            if stat.frequency == 0 {
                stat.gap = age as u32;
            }
            stat.frequency += 1;
        }
    }

    stats
}

/// The `n` most frequent numbers; ties go to the lower number.
pub fn most_frequent(stats: &[NumberStats], n: usize) -> Vec<u8> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));
    sorted.iter().take(n).map(|s| s.number).collect()
}

/// The `n` least frequent numbers; ties go to the lower number.
pub fn least_frequent(stats: &[NumberStats], n: usize) -> Vec<u8> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| a.frequency.cmp(&b.frequency).then(a.number.cmp(&b.number)));
    sorted.iter().take(n).map(|s| s.number).collect()
}

pub fn sum_summary(draws: &[Draw]) -> Option<SumSummary> {
    if draws.is_empty() {
        return None;
    }
    let mut sums: Vec<u32> = draws.iter().map(Draw::sum).collect();
    sums.sort_unstable();

    let n = sums.len() as f64;
    let mean = sums.iter().map(|&s| s as f64).sum::<f64>() / n;
    let variance = sums.iter().map(|&s| (s as f64 - mean).powi(2)).sum::<f64>() / n;
    let mid = sums.len() / 2;
    let median = if sums.len() % 2 == 0 {
        (sums[mid - 1] as f64 + sums[mid] as f64) / 2.0
    } else {
        sums[mid] as f64
    };

    Some(SumSummary {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sums[0],
        max: sums[sums.len() - 1],
    })
}

/// Index = number of even values in a draw.
pub fn parity_distribution(draws: &[Draw]) -> [u32; PICK_COUNT + 1] {
    let mut dist = [0u32; PICK_COUNT + 1];
    for draw in draws {
        dist[draw.even_count()] += 1;
    }
    dist
}

pub fn decade_of(n: u8) -> usize {
    (((n.max(1) - 1) / 10) as usize).min(DECADE_LABELS.len() - 1)
}

pub fn decade_distribution(draws: &[Draw]) -> [u32; 5] {
    let mut dist = [0u32; 5];
    for draw in draws {
        for &n in &draw.numbers {
            dist[decade_of(n)] += 1;
        }
    }
    dist
}

pub fn sequence_summary(draws: &[Draw]) -> SequenceSummary {
    let mut summary = SequenceSummary {
        with_pair: 0,
        with_triple: 0,
        longest: 0,
    };
    for draw in draws {
        let run = draw.longest_run();
        if run >= 2 {
            summary.with_pair += 1;
        }
        if run >= 3 {
            summary.with_triple += 1;
        }
        summary.longest = summary.longest.max(run);
    }
    summary
}

/// Index = numbers shared with the previous draw.
pub fn repeat_distribution(draws: &[Draw]) -> [u32; PICK_COUNT + 1] {
    let mut dist = [0u32; PICK_COUNT + 1];
    for pair in draws.windows(2) {
        let shared = pair[1]
            .numbers
            .iter()
            .filter(|n| pair[0].numbers.contains(n))
            .count();
        dist[shared] += 1;
    }
    dist
}

pub fn chi_square(stats: &[NumberStats], draw_count: usize) -> ChiSquare {
    let expected = draw_count as f64 * PICK_COUNT as f64 / POOL_SIZE as f64;
    let statistic = if expected > 0.0 {
        stats
            .iter()
            .map(|s| (s.frequency as f64 - expected).powi(2) / expected)
            .sum()
    } else {
        0.0
    };
    ChiSquare {
        statistic,
        degrees_of_freedom: POOL_SIZE as u32 - 1,
        critical_005: CHI_SQUARE_CRITICAL_005,
        uniform: statistic <= CHI_SQUARE_CRITICAL_005,
    }
}

/// Mean value at each sorted position.
pub fn positional_means(draws: &[Draw]) -> [f64; PICK_COUNT] {
    let mut means = [0.0f64; PICK_COUNT];
    if draws.is_empty() {
        return means;
    }
    for draw in draws {
        for (i, &n) in draw.numbers.iter().enumerate() {
            means[i] += n as f64;
        }
    }
    for m in &mut means {
        *m /= draws.len() as f64;
    }
    means
}

/// Calendar decade (1950, 1960, ...) mapped to the mean draw sum.
pub fn mean_sum_by_decade(draws: &[Draw]) -> Vec<(i32, f64)> {
    let mut groups: BTreeMap<i32, (u64, u32)> = BTreeMap::new();
    for draw in draws {
        let decade = (draw.date.year() / 10) * 10;
        let entry = groups.entry(decade).or_insert((0, 0));
        entry.0 += draw.sum() as u64;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(decade, (total, count))| (decade, total as f64 / count as f64))
        .collect()
}

/// Most common distances between adjacent sorted numbers, most frequent first.
pub fn gap_distances(draws: &[Draw], top: usize) -> Vec<(u8, u32)> {
    let mut counts: HashMap<u8, u32> = HashMap::new();
    for draw in draws {
        for w in draw.numbers.windows(2) {
            *counts.entry(w[1] - w[0]).or_insert(0) += 1;
        }
    }
    let mut sorted: Vec<(u8, u32)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted.truncate(top);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_draws;
    use chrono::NaiveDate;

    fn draw(index: u32, year: i32, numbers: [u8; 6]) -> Draw {
        Draw {
            index,
            date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_compute_stats_frequency_and_gap() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 4, 5, 6]),
            draw(2, 2000, [1, 10, 20, 30, 40, 49]),
        ];
        let stats = compute_stats(&draws);
        assert_eq!(stats.len(), 49);
        assert_eq!(stats[0].frequency, 2);
        assert_eq!(stats[0].gap, 0);
        assert_eq!(stats[1].frequency, 1);
        assert_eq!(stats[1].gap, 1);
        assert_eq!(stats[6].frequency, 0);
        assert_eq!(stats[6].gap, 2);
    }

    #[test]
    fn test_compute_stats_ignores_out_of_pool_numbers() {
        let draws = vec![draw(1, 2000, [0, 2, 3, 4, 5, 50])];
        let stats = compute_stats(&draws);
        assert_eq!(stats.len(), 49);
        assert_eq!(stats.iter().map(|s| s.frequency).sum::<u32>(), 4);
        assert_eq!(stats[1].frequency, 1);
        assert_eq!(stats[48].frequency, 0);
    }

    #[test]
    fn test_total_frequency_matches_draws() {
        let draws = make_test_draws(40);
        let stats = compute_stats(&draws);
        let total: u32 = stats.iter().map(|s| s.frequency).sum();
        assert_eq!(total as usize, draws.len() * PICK_COUNT);
    }

    #[test]
    fn test_most_and_least_frequent() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 4, 5, 6]),
            draw(2, 2000, [1, 2, 3, 7, 8, 9]),
            draw(3, 2000, [1, 2, 10, 11, 12, 13]),
        ];
        let stats = compute_stats(&draws);
        assert_eq!(most_frequent(&stats, 3), vec![1, 2, 3]);
        // 14 is the lowest number never drawn
        assert_eq!(least_frequent(&stats, 1), vec![14]);
    }

    #[test]
    fn test_sum_summary() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 4, 5, 6]),
            draw(2, 2000, [8, 12, 31, 39, 43, 45]),
            draw(3, 2000, [44, 45, 46, 47, 48, 49]),
        ];
        let summary = sum_summary(&draws).unwrap();
        assert_eq!(summary.min, 21);
        assert_eq!(summary.max, 279);
        assert!((summary.median - 178.0).abs() < 1e-10);
        assert!((summary.mean - (21.0 + 178.0 + 279.0) / 3.0).abs() < 1e-10);
        assert!(sum_summary(&[]).is_none());
    }

    #[test]
    fn test_parity_distribution() {
        let draws = vec![
            draw(1, 2000, [2, 4, 6, 8, 10, 12]),
            draw(2, 2000, [1, 2, 3, 4, 5, 6]),
        ];
        let dist = parity_distribution(&draws);
        assert_eq!(dist[6], 1);
        assert_eq!(dist[3], 1);
        assert_eq!(dist.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_decade_distribution() {
        assert_eq!(decade_of(1), 0);
        assert_eq!(decade_of(10), 0);
        assert_eq!(decade_of(11), 1);
        assert_eq!(decade_of(49), 4);
        let dist = decade_distribution(&[draw(1, 2000, [1, 11, 21, 31, 41, 49])]);
        assert_eq!(dist, [1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_sequence_summary() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 20, 30, 40]),
            draw(2, 2000, [5, 6, 15, 25, 35, 45]),
            draw(3, 2000, [2, 4, 6, 8, 10, 12]),
        ];
        let summary = sequence_summary(&draws);
        assert_eq!(summary.with_pair, 2);
        assert_eq!(summary.with_triple, 1);
        assert_eq!(summary.longest, 3);
    }

    #[test]
    fn test_repeat_distribution() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 4, 5, 6]),
            draw(2, 2000, [1, 2, 30, 40, 45, 49]),
            draw(3, 2000, [7, 8, 9, 10, 11, 12]),
        ];
        let dist = repeat_distribution(&draws);
        assert_eq!(dist[2], 1);
        assert_eq!(dist[0], 1);
    }

    #[test]
    fn test_chi_square_uniform_when_flat() {
        let stats: Vec<NumberStats> = (1..=POOL_SIZE)
            .map(|n| NumberStats { number: n, frequency: 6, gap: 0 })
            .collect();
        let chi = chi_square(&stats, 49);
        assert!(chi.statistic.abs() < 1e-10);
        assert!(chi.uniform);
        assert_eq!(chi.degrees_of_freedom, 48);
    }

    #[test]
    fn test_chi_square_skewed() {
        let draws: Vec<Draw> = (0..100).map(|i| draw(i, 2000, [1, 2, 3, 4, 5, 6])).collect();
        let chi = chi_square(&compute_stats(&draws), draws.len());
        assert!(!chi.uniform);
    }

    #[test]
    fn test_positional_means() {
        let draws = vec![
            draw(1, 2000, [1, 2, 3, 4, 5, 6]),
            draw(2, 2000, [3, 4, 5, 6, 7, 8]),
        ];
        let means = positional_means(&draws);
        assert!((means[0] - 2.0).abs() < 1e-10);
        assert!((means[5] - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_sum_by_decade() {
        let draws = vec![
            draw(1, 1957, [1, 2, 3, 4, 5, 6]),
            draw(2, 1959, [1, 2, 3, 4, 5, 8]),
            draw(3, 1961, [10, 20, 30, 40, 45, 49]),
        ];
        let by_decade = mean_sum_by_decade(&draws);
        assert_eq!(by_decade.len(), 2);
        assert_eq!(by_decade[0].0, 1950);
        assert!((by_decade[0].1 - 22.0).abs() < 1e-10);
        assert_eq!(by_decade[1].0, 1960);
    }

    #[test]
    fn test_gap_distances() {
        let draws = vec![draw(1, 2000, [1, 2, 3, 10, 11, 20])];
        let gaps = gap_distances(&draws, 2);
        assert_eq!(gaps[0], (1, 3));
        assert_eq!(gaps[1], (7, 1));
    }
}
