use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use lotto_data::models::{Draw, NumberStats, POOL_SIZE};
use lotto_data::stats::{compute_stats, least_frequent, most_frequent};

use crate::config::GeneratorConfig;

/// Frequent / infrequent numbers from a one-time analysis of the full history.
pub const DEFAULT_HOT: [u8; 10] = [17, 21, 34, 38, 24, 27, 4, 6, 25, 13];
pub const DEFAULT_COLD: [u8; 10] = [48, 43, 47, 12, 44, 33, 35, 23, 16, 39];

/// Same analysis restricted to the last 100 draws.
pub const DEFAULT_RECENT_HOT: [u8; 10] = [7, 11, 19, 22, 29, 31, 36, 40, 42, 45];
pub const DEFAULT_RECENT_COLD: [u8; 10] = [1, 2, 9, 15, 26, 30, 37, 41, 46, 49];

/// Hot/cold buckets driving the strategies. Carries no predictive value:
/// draws are independent, the table only shapes which numbers get sampled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotColdTable {
    hot: Vec<u8>,
    cold: Vec<u8>,
    recent_hot: Vec<u8>,
    recent_cold: Vec<u8>,
}

impl Default for HotColdTable {
    fn default() -> Self {
        Self {
            hot: DEFAULT_HOT.to_vec(),
            cold: DEFAULT_COLD.to_vec(),
            recent_hot: DEFAULT_RECENT_HOT.to_vec(),
            recent_cold: DEFAULT_RECENT_COLD.to_vec(),
        }
    }
}

impl HotColdTable {
    pub fn new(hot: Vec<u8>, cold: Vec<u8>, recent_hot: Vec<u8>, recent_cold: Vec<u8>) -> Result<Self> {
        let table = Self { hot, cold, recent_hot, recent_cold };
        table.validate()?;
        Ok(table)
    }

    /// Derives every list from frequencies: whole history for hot/cold, the
    /// last `config.recent_window` draws for the recent pair.
    pub fn from_history(draws: &[Draw], config: &GeneratorConfig) -> Result<Self> {
        if draws.is_empty() {
            bail!("Brak losowań do wyznaczenia liczb gorących i zimnych");
        }
        let n = config.list_len.min(POOL_SIZE as usize / 2);

        let all = compute_stats(draws);
        let start = draws.len().saturating_sub(config.recent_window);
        let recent = compute_stats(&draws[start..]);

        let (hot, cold) = split_by_frequency(&all, n);
        let (recent_hot, recent_cold) = split_by_frequency(&recent, n);
        Self::new(hot, cold, recent_hot, recent_cold)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, list) in self.lists() {
            if list.is_empty() {
                bail!("Lista '{}' jest pusta", name);
            }
            for (i, &n) in list.iter().enumerate() {
                if n < 1 || n > POOL_SIZE {
                    bail!("Lista '{}': liczba {} poza zakresem (1-{})", name, n, POOL_SIZE);
                }
                if list[..i].contains(&n) {
                    bail!("Lista '{}': powtórzona liczba {}", name, n);
                }
            }
        }
        if let Some(n) = self.hot.iter().find(|n| self.cold.contains(n)) {
            bail!("Liczba {} jest jednocześnie gorąca i zimna", n);
        }
        if let Some(n) = self.recent_hot.iter().find(|n| self.recent_cold.contains(n)) {
            bail!("Liczba {} jest jednocześnie ostatnio gorąca i ostatnio zimna", n);
        }
        Ok(())
    }

    fn lists(&self) -> [(&'static str, &[u8]); 4] {
        [
            ("hot", self.hot.as_slice()),
            ("cold", self.cold.as_slice()),
            ("recent_hot", self.recent_hot.as_slice()),
            ("recent_cold", self.recent_cold.as_slice()),
        ]
    }

    pub fn hot(&self) -> &[u8] {
        &self.hot
    }

    pub fn cold(&self) -> &[u8] {
        &self.cold
    }

    pub fn recent_hot(&self) -> &[u8] {
        &self.recent_hot
    }

    pub fn recent_cold(&self) -> &[u8] {
        &self.recent_cold
    }

    /// 1..=49 minus hot and cold.
    pub fn neutral(&self) -> Vec<u8> {
        complement(&[self.hot.as_slice(), self.cold.as_slice()])
    }

    /// 1..=49 minus recent hot and recent cold.
    pub fn recent_neutral(&self) -> Vec<u8> {
        complement(&[self.recent_hot.as_slice(), self.recent_cold.as_slice()])
    }

    pub fn is_hot(&self, n: u8) -> bool {
        self.hot.contains(&n)
    }
}

/// Top `n` and bottom `n` numbers, kept disjoint even when frequencies tie.
fn split_by_frequency(stats: &[NumberStats], n: usize) -> (Vec<u8>, Vec<u8>) {
    let hot = most_frequent(stats, n);
    let cold = least_frequent(stats, stats.len())
        .into_iter()
        .filter(|x| !hot.contains(x))
        .take(n)
        .collect();
    (hot, cold)
}

fn complement(excluded: &[&[u8]]) -> Vec<u8> {
    (1..=POOL_SIZE)
        .filter(|n| !excluded.iter().any(|list| list.contains(n)))
        .collect()
}

pub fn load_table(path: &Path) -> Result<HotColdTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Nie można odczytać {:?}", path))?;
    let table: HotColdTable = serde_json::from_str(&json)
        .with_context(|| format!("Nieprawidłowy JSON w {:?}", path))?;
    table.validate()?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_data::models::make_test_draws;

    #[test]
    fn test_default_table_is_valid() {
        let table = HotColdTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.hot().len(), 10);
        assert_eq!(table.cold().len(), 10);
    }

    #[test]
    fn test_neutral_is_complement() {
        let table = HotColdTable::default();
        let neutral = table.neutral();
        assert_eq!(neutral.len(), 29);
        for n in &neutral {
            assert!(!table.hot().contains(n));
            assert!(!table.cold().contains(n));
        }
        assert_eq!(table.recent_neutral().len(), 29);
    }

    #[test]
    fn test_new_rejects_overlap() {
        let err = HotColdTable::new(vec![1, 2, 3], vec![3, 4, 5], vec![6], vec![7]);
        assert!(err.is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range_and_duplicates() {
        assert!(HotColdTable::new(vec![0, 2], vec![3], vec![6], vec![7]).is_err());
        assert!(HotColdTable::new(vec![50], vec![3], vec![6], vec![7]).is_err());
        assert!(HotColdTable::new(vec![2, 2], vec![3], vec![6], vec![7]).is_err());
        assert!(HotColdTable::new(vec![], vec![3], vec![6], vec![7]).is_err());
    }

    #[test]
    fn test_from_history() {
        let draws = make_test_draws(70);
        let config = GeneratorConfig::default();
        let table = HotColdTable::from_history(&draws, &config).unwrap();
        assert_eq!(table.hot().len(), 10);
        assert_eq!(table.recent_cold().len(), 10);

        let stats = compute_stats(&draws);
        let top = stats.iter().map(|s| s.frequency).max().unwrap();
        let first = table.hot()[0];
        assert_eq!(stats[(first - 1) as usize].frequency, top);
    }

    #[test]
    fn test_from_history_flat_frequencies_stay_disjoint() {
        let draws = make_test_draws(1);
        let table = HotColdTable::from_history(&draws, &GeneratorConfig::default()).unwrap();
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_from_history_empty() {
        assert!(HotColdTable::from_history(&[], &GeneratorConfig::default()).is_err());
    }

    #[test]
    fn test_table_json_roundtrip_validates() {
        let json = serde_json::to_string(&HotColdTable::default()).unwrap();
        let restored: HotColdTable = serde_json::from_str(&json).unwrap();
        assert!(restored.validate().is_ok());
        assert_eq!(restored, HotColdTable::default());
    }
}
