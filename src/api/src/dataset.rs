//! Historical match data loading.
//!
//! Reads a CSV file of match rows (one team's view of a match per row),
//! keeping only well-formed rows from the configured competition.

use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PredictorError, Result};
use crate::outcome::Outcome;

/// Where the subject team of a row played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Parse a venue column value (`Home` or `Away`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Home" => Some(Venue::Home),
            "Away" => Some(Venue::Away),
            _ => None,
        }
    }
}

/// A validated match row. `result` is from `team`'s perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub team: String,
    pub opponent: String,
    pub venue: Venue,
    pub result: Outcome,
    pub season: i32,
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    comp: Option<usize>,
    team: Option<usize>,
    opponent: Option<usize>,
    venue: Option<usize>,
    result: Option<usize>,
    season: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            comp: find("comp"),
            team: find("team"),
            opponent: find("opponent"),
            venue: find("venue"),
            result: find("result"),
            season: find("season"),
        }
    }
}

/// Non-empty value of a column, if the column exists and the row has it.
fn field(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i)).filter(|v| !v.is_empty())
}

/// Parse a season value, truncating fractional years ("2019.0" -> 2019).
fn parse_season(raw: &str) -> Option<i32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let year = value.trunc();
    if year < i32::MIN as f64 || year > i32::MAX as f64 {
        return None;
    }
    Some(year as i32)
}

fn parse_row(record: &StringRecord, cols: &Columns, competition: &str) -> Option<MatchRecord> {
    if let Some(comp) = field(record, cols.comp) {
        if comp != competition {
            return None;
        }
    }

    let team = field(record, cols.team)?;
    let opponent = field(record, cols.opponent)?;
    let venue = field(record, cols.venue)?;
    let result = field(record, cols.result)?;
    let season = field(record, cols.season)?;

    Some(MatchRecord {
        team: team.to_string(),
        opponent: opponent.to_string(),
        venue: Venue::from_code(venue)?,
        result: Outcome::from_code(result)?,
        season: parse_season(season)?,
    })
}

/// Load match records from a CSV file.
///
/// Fails only if the file cannot be opened or its header cannot be read;
/// individual bad rows are skipped.
pub fn load_matches<P: AsRef<Path>>(path: P, competition: &str) -> Result<Vec<MatchRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PredictorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_matches(file, competition)
}

/// Load match records from any CSV reader with a header row.
pub fn read_matches<R: Read>(reader: R, competition: &str) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let cols = Columns::from_headers(reader.headers()?);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let parsed = match row {
            Ok(record) => parse_row(&record, &cols, competition),
            Err(e) => {
                tracing::debug!("Skipping unreadable row: {}", e);
                None
            }
        };
        match parsed {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    tracing::info!("Loaded {} matches ({} rows filtered)", records.len(), skipped);
    Ok(records)
}
