use std::fmt;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::entropy::EntropyDigest;
use crate::generators;
use crate::table::HotColdTable;

/// Raw candidate builder; output still has to pass through the adjuster
/// unless `Strategy::adjusted` says otherwise.
pub type GeneratorFn = fn(&HotColdTable, &mut StdRng) -> Vec<u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Hot,
    Cold,
    Mixed,
    Positional,
    Sequence,
    DecadeBalanced,
    RecentTrend,
}

impl Strategy {
    /// Selection order: index `i` is picked when the digest prefix is `i` mod 7.
    pub const ALL: [Strategy; 7] = [
        Strategy::Hot,
        Strategy::Cold,
        Strategy::Mixed,
        Strategy::Positional,
        Strategy::Sequence,
        Strategy::DecadeBalanced,
        Strategy::RecentTrend,
    ];

    pub fn from_index(value: u32) -> Strategy {
        Self::ALL[(value % Self::ALL.len() as u32) as usize]
    }

    pub fn select(digest: &EntropyDigest) -> Strategy {
        Self::from_index(digest.prefix_value())
    }

    /// Same mapping for a raw hex string; only the first 8 characters count.
    pub fn from_prefix(hex: &str) -> Result<Strategy> {
        let Some(prefix) = hex.get(..8) else {
            bail!("Potrzeba co najmniej 8 znaków szesnastkowych, otrzymano '{}'", hex);
        };
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Nieprawidłowy prefiks szesnastkowy: '{}'", prefix);
        }
        let value = u32::from_str_radix(prefix, 16)
            .with_context(|| format!("Nieprawidłowy prefiks szesnastkowy: '{}'", prefix))?;
        Ok(Self::from_index(value))
    }

    pub fn generator(self) -> GeneratorFn {
        match self {
            Strategy::Hot => generators::hot,
            Strategy::Cold => generators::cold,
            Strategy::Mixed => generators::mixed,
            Strategy::Positional => generators::positional,
            Strategy::Sequence => generators::sequence,
            Strategy::DecadeBalanced => generators::decade_balanced,
            Strategy::RecentTrend => generators::recent_trend,
        }
    }

    /// Positional output is already six sorted distinct numbers and keeps its
    /// natural parity.
    pub fn adjusted(self) -> bool {
        !matches!(self, Strategy::Positional)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Strategy::Hot => "🔥",
            Strategy::Cold => "❄️",
            Strategy::Mixed => "🎯",
            Strategy::Positional => "📊",
            Strategy::Sequence => "🔗",
            Strategy::DecadeBalanced => "🔢",
            Strategy::RecentTrend => "📈",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Hot => "Liczby gorące",
            Strategy::Cold => "Liczby zimne",
            Strategy::Mixed => "Mieszana",
            Strategy::Positional => "Pozycyjna",
            Strategy::Sequence => "Z sekwencjami",
            Strategy::DecadeBalanced => "Równomierne dziesiątki",
            Strategy::RecentTrend => "Trend ostatnich losowań",
        };
        write!(f, "{}", name)
    }
}
