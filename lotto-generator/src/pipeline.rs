use std::collections::HashMap;

use anyhow::Result;
use rand::rngs::StdRng;

use lotto_data::models::{validate_numbers, PICK_COUNT};

use crate::adjuster::adjust;
use crate::config::GeneratorConfig;
use crate::scoring::{score, Score};
use crate::strategy::Strategy;
use crate::table::HotColdTable;

/// Generator, then the adjuster when the strategy asks for it.
pub fn generate(
    strategy: Strategy,
    table: &HotColdTable,
    config: &GeneratorConfig,
    rng: &mut StdRng,
) -> Result<[u8; PICK_COUNT]> {
    let raw = (strategy.generator())(table, rng);
    log::debug!("{:?}: kandydat {:?}", strategy, raw);

    let numbers = if strategy.adjusted() {
        adjust(&raw, config.target_evens, rng)?
    } else {
        let mut out = [0u8; PICK_COUNT];
        validate_numbers(&raw)?;
        out.copy_from_slice(&raw);
        out.sort_unstable();
        out
    };
    Ok(numbers)
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub strategy: Strategy,
    pub score: Score,
}

#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Most common numbers across all candidates, most frequent first.
    pub most_common: Vec<(u8, u32)>,
    pub mean_sum: f64,
    pub min_sum: u32,
    pub max_sum: u32,
}

#[derive(Debug, Clone)]
pub struct FullRun {
    pub candidates: Vec<Candidate>,
    /// Index into `candidates` of the sum closest to `config.reference_sum`.
    pub recommended: usize,
    pub summary: GenerationSummary,
}

/// Every strategy once, in selection order.
pub fn run_all(table: &HotColdTable, config: &GeneratorConfig, rng: &mut StdRng) -> Result<FullRun> {
    let candidates = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let numbers = generate(strategy, table, config, rng)?;
            Ok(Candidate {
                strategy,
                score: score(&numbers, table, config),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let recommended = recommend(&candidates, config.reference_sum);
    let summary = summarize(&candidates, 10);

    Ok(FullRun {
        candidates,
        recommended,
        summary,
    })
}

/// First candidate with the smallest distance to the reference sum.
pub fn recommend(candidates: &[Candidate], reference_sum: u32) -> usize {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(i, c)| (c.score.sum.abs_diff(reference_sum), *i))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub fn summarize(candidates: &[Candidate], top: usize) -> GenerationSummary {
    let mut counts: HashMap<u8, u32> = HashMap::new();
    for c in candidates {
        for &n in &c.score.numbers {
            *counts.entry(n).or_insert(0) += 1;
        }
    }
    let mut most_common: Vec<(u8, u32)> = counts.into_iter().collect();
    most_common.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    most_common.truncate(top);

    let sums: Vec<u32> = candidates.iter().map(|c| c.score.sum).collect();
    let mean_sum = if sums.is_empty() {
        0.0
    } else {
        sums.iter().map(|&s| s as f64).sum::<f64>() / sums.len() as f64
    };

    GenerationSummary {
        most_common,
        mean_sum,
        min_sum: sums.iter().copied().min().unwrap_or(0),
        max_sum: sums.iter().copied().max().unwrap_or(0),
    }
}
