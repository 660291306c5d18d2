use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sysinfo::{System, SystemExt};

use lotto_data::models::{PICK_COUNT, POOL_SIZE};

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Ambient, non-cryptographic signal. `sample` may fail; `fallback` may not.
pub trait WeakEntropySource {
    fn label(&self) -> &str;
    fn sample(&mut self) -> Result<String>;
    fn fallback(&mut self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntropySample {
    pub label: String,
    pub value: String,
    pub fallback: bool,
}

/// SHA-256 of the concatenated samples. Used as a selector and RNG seed only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntropyDigest([u8; 32]);

impl EntropyDigest {
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).with_context(|| format!("Nieprawidłowy skrót: '{}'", s))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow::anyhow!("Skrót musi mieć 32 bajty, ma {}", b.len()))?;
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Value of the leading 8 hex characters.
    pub fn prefix_value(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Six distinct numbers read straight from the digest: segment `i`
    /// (8 hex chars) maps to `value % 49 + 1`, bumped until unused.
    pub fn numbers(&self) -> [u8; PICK_COUNT] {
        let mut numbers = [0u8; PICK_COUNT];
        for i in 0..PICK_COUNT {
            let b = &self.0[i * 4..i * 4 + 4];
            let mut value = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
            let mut number = (value % POOL_SIZE as u32) as u8 + 1;
            while numbers[..i].contains(&number) {
                value = value.wrapping_add(1);
                number = (value % POOL_SIZE as u32) as u8 + 1;
            }
            numbers[i] = number;
        }
        numbers.sort_unstable();
        numbers
    }
}

impl fmt::Display for EntropyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[derive(Debug, Clone)]
pub struct EntropyReport {
    pub samples: Vec<EntropySample>,
    pub digest: EntropyDigest,
}

pub struct EntropyCollector {
    sources: Vec<Box<dyn WeakEntropySource>>,
}

impl EntropyCollector {
    pub fn new(sources: Vec<Box<dyn WeakEntropySource>>) -> Self {
        Self { sources }
    }

    /// Wall clock, process count, memory, temp dir, I/O latency.
    pub fn system() -> Self {
        Self::new(vec![
            Box::new(WallClock),
            Box::new(ProcessCount),
            Box::new(MemoryProbe),
            Box::new(TempDirProbe),
            Box::new(IoLatency),
        ])
    }

    pub fn collect(&mut self) -> EntropyReport {
        let mut samples = Vec::with_capacity(self.sources.len());
        let mut combined = String::new();

        for source in &mut self.sources {
            let sample = match source.sample() {
                Ok(value) => EntropySample {
                    label: source.label().to_string(),
                    value,
                    fallback: false,
                },
                Err(e) => {
                    log::debug!("Sonda '{}' niedostępna: {:#}", source.label(), e);
                    EntropySample {
                        label: source.label().to_string(),
                        value: source.fallback(),
                        fallback: true,
                    }
                }
            };
            combined.push_str(&sample.value);
            samples.push(sample);
        }

        let digest = EntropyDigest::of(combined.as_bytes());
        log::debug!("Skrót entropii: {}", digest);
        EntropyReport { samples, digest }
    }
}

/// Constant source for reproducible runs and tests.
pub struct FixedSource {
    label: String,
    value: String,
}

impl FixedSource {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

impl WeakEntropySource for FixedSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&mut self) -> Result<String> {
        Ok(self.value.clone())
    }

    fn fallback(&mut self) -> String {
        self.value.clone()
    }
}

pub struct WallClock;

impl WeakEntropySource for WallClock {
    fn label(&self) -> &str {
        "Czas systemowy"
    }

    fn sample(&mut self) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("Zegar przed epoką UNIX")?;
        Ok(format!("{}.{:06}", now.as_secs(), now.subsec_micros()))
    }

    fn fallback(&mut self) -> String {
        rand::random::<u64>().to_string()
    }
}

pub struct ProcessCount;

impl WeakEntropySource for ProcessCount {
    fn label(&self) -> &str {
        "Liczba procesów"
    }

    fn sample(&mut self) -> Result<String> {
        if !System::IS_SUPPORTED {
            bail!("sysinfo nie obsługuje tej platformy");
        }
        let mut sys = System::new();
        sys.refresh_processes();
        let count = sys.processes().len();
        if count == 0 {
            bail!("Pusta lista procesów");
        }
        Ok(count.to_string())
    }

    fn fallback(&mut self) -> String {
        std::process::id().to_string()
    }
}

pub struct MemoryProbe;

impl WeakEntropySource for MemoryProbe {
    fn label(&self) -> &str {
        "Entropia pamięci"
    }

    fn sample(&mut self) -> Result<String> {
        if !System::IS_SUPPORTED {
            bail!("sysinfo nie obsługuje tej platformy");
        }
        let mut sys = System::new();
        sys.refresh_memory();
        if sys.total_memory() == 0 {
            bail!("Brak danych o pamięci");
        }
        Ok(sys.used_memory().to_string())
    }

    fn fallback(&mut self) -> String {
        rand::random::<u32>().to_string()
    }
}

pub struct TempDirProbe;

impl WeakEntropySource for TempDirProbe {
    fn label(&self) -> &str {
        "Pliki tymczasowe"
    }

    /// Entry count plus the name lengths of the first ten entries.
    fn sample(&mut self) -> Result<String> {
        let dir = std::env::temp_dir();
        let names = std::fs::read_dir(&dir)
            .with_context(|| format!("Nie można odczytać {:?}", dir))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().len())
            .collect::<Vec<_>>();
        let value = names.len() + names.iter().take(10).sum::<usize>();
        Ok(value.to_string())
    }

    fn fallback(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let digest = Sha256::digest(now.to_string().as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head).to_string()
    }
}

pub struct IoLatency;

impl WeakEntropySource for IoLatency {
    fn label(&self) -> &str {
        "Opóźnienie I/O (μs)"
    }

    fn sample(&mut self) -> Result<String> {
        let start = Instant::now();
        match OpenOptions::new().write(true).open(NULL_DEVICE) {
            Ok(mut f) => {
                let _ = f.write_all(b"test");
            }
            Err(_) => {
                let _ = std::io::sink().write_all(b"test");
            }
        }
        Ok(start.elapsed().as_micros().to_string())
    }

    fn fallback(&mut self) -> String {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSource;

    impl WeakEntropySource for BrokenSource {
        fn label(&self) -> &str {
            "broken"
        }

        fn sample(&mut self) -> Result<String> {
            bail!("probe exploded")
        }

        fn fallback(&mut self) -> String {
            "fallback-value".to_string()
        }
    }

    fn fixed_collector() -> EntropyCollector {
        EntropyCollector::new(vec![
            Box::new(FixedSource::new("a", "123")),
            Box::new(FixedSource::new("b", "456")),
        ])
    }

    #[test]
    fn test_digest_is_sha256_of_concatenation() {
        let report = fixed_collector().collect();
        assert_eq!(report.digest, EntropyDigest::of(b"123456"));
        assert_eq!(report.samples.len(), 2);
        assert!(report.samples.iter().all(|s| !s.fallback));
    }

    #[test]
    fn test_known_digest() {
        let digest = EntropyDigest::of(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.prefix_value(), 0xba7816bf);
    }

    #[test]
    fn test_failing_probe_uses_fallback() {
        let mut collector = EntropyCollector::new(vec![
            Box::new(FixedSource::new("a", "1")),
            Box::new(BrokenSource),
        ]);
        let report = collector.collect();
        assert_eq!(report.samples[1].value, "fallback-value");
        assert!(report.samples[1].fallback);
        assert_eq!(report.digest, EntropyDigest::of(b"1fallback-value"));
    }

    #[test]
    fn test_system_collector_never_fails() {
        let report = EntropyCollector::system().collect();
        assert_eq!(report.samples.len(), 5);
        assert_eq!(report.digest.to_hex().len(), 64);
        assert!(report.samples.iter().all(|s| !s.value.is_empty()));
    }

    #[test]
    fn test_hex_roundtrip_and_errors() {
        let digest = EntropyDigest::of(b"lotto");
        assert_eq!(EntropyDigest::from_hex(&digest.to_hex()).unwrap(), digest);
        assert!(EntropyDigest::from_hex("zz").is_err());
        assert!(EntropyDigest::from_hex("00ff").is_err());
    }

    #[test]
    fn test_digest_numbers_distinct_in_range() {
        for seed in 0..200u32 {
            let digest = EntropyDigest::of(seed.to_string().as_bytes());
            let numbers = digest.numbers();
            assert!(lotto_data::models::validate_numbers(&numbers).is_ok(), "{:?}", numbers);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_digest_numbers_collision_bumps() {
        // Every segment is zero, so each number bumps past the previous ones.
        let digest = EntropyDigest::from_hex(&"0".repeat(64)).unwrap();
        assert_eq!(digest.numbers(), [1, 2, 3, 4, 5, 6]);
    }
}
