use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use crate::models::{validate_numbers, Draw, PICK_COUNT};

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parsed history file, oldest draw first.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub draws: Vec<Draw>,
    pub total_lines: u32,
    pub skipped: u32,
}

impl History {
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.draws.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.draws.last().map(|d| d.date)
    }

    /// The `n` most recent draws, still oldest first.
    pub fn recent(&self, n: usize) -> &[Draw] {
        let start = self.draws.len().saturating_sub(n);
        &self.draws[start..]
    }
}

/// Parses one `"<index>. <dd.mm.yyyy> n1,n2,n3,n4,n5,n6"` line.
pub fn parse_line(line: &str) -> Result<Draw> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    parse_fields(&fields)
}

/// Rejoins the space-split record so tabs and runs of spaces parse the same
/// way as in `parse_line`.
fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let line = record.iter().collect::<Vec<_>>().join(" ");
    parse_line(&line)
}

fn parse_fields(fields: &[&str]) -> Result<Draw> {
    if fields.len() < 3 {
        bail!("Za mało pól: {}", fields.len());
    }

    let raw_index = fields[0].trim_end_matches('.');
    let index = raw_index
        .parse::<u32>()
        .with_context(|| format!("Nieprawidłowy numer losowania: '{}'", fields[0]))?;

    let date = NaiveDate::parse_from_str(fields[1], DATE_FORMAT)
        .with_context(|| format!("Nieprawidłowa data: '{}'", fields[1]))?;

    let joined = fields[2..].join(" ");
    let numbers = joined
        .split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<u8>()
                .with_context(|| format!("Nieprawidłowa liczba: '{}'", s))
        })
        .collect::<Result<Vec<u8>>>()?;

    validate_numbers(&numbers)?;

    let mut arr = [0u8; PICK_COUNT];
    arr.copy_from_slice(&numbers);
    arr.sort_unstable();

    Ok(Draw {
        index,
        date,
        numbers: arr,
    })
}

/// Reads a whole history stream. Malformed lines are skipped, never fatal.
pub fn read_history<R: Read>(reader: R) -> Result<History> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .quoting(false)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut history = History::default();

    for record_result in reader.records() {
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                history.total_lines += 1;
                history.skipped += 1;
                log::debug!("Linia {} nieczytelna: {}", history.total_lines, e);
                continue;
            }
        };

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        history.total_lines += 1;

        match parse_record(&record) {
            Ok(draw) => history.draws.push(draw),
            Err(e) => {
                history.skipped += 1;
                log::debug!("Linia {} pominięta: {:#}", history.total_lines, e);
            }
        }
    }

    Ok(history)
}

pub fn load_history(path: &Path) -> Result<History> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Nie można otworzyć pliku {:?}", path))?;
    let history = read_history(file)
        .with_context(|| format!("Błąd odczytu {:?}", path))?;
    log::info!(
        "{} losowań wczytanych z {:?} ({} pominiętych)",
        history.len(),
        path,
        history.skipped
    );
    Ok(history)
}
