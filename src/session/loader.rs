//! Session log loading and cleaning.
//!
//! The loader turns the raw CSV written by the presentation front-end into
//! typed records. A header missing a required column is fatal; a row with a
//! missing or unparseable required numeric field is dropped and counted,
//! never aborting the run.

use crate::session::types::{SessionRecord, Trial, TrialKey};
use std::collections::BTreeMap;
use std::path::Path;

/// Columns that must be present in the session log header.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "participant",
    "condition",
    "trial",
    "tau",
    "t",
    "y_t",
    "x_p",
    "y_p",
];

/// Result of loading a session log.
#[derive(Debug)]
pub struct LoadedSession {
    /// Rows that parsed cleanly
    pub records: Vec<SessionRecord>,
    /// Rows dropped for missing or unparseable required fields
    pub dropped_rows: usize,
}

/// Column indices resolved from the header.
struct ColumnIndex {
    participant: usize,
    condition: usize,
    trial: usize,
    tau: usize,
    t: usize,
    y_t: usize,
    x_p: usize,
    y_p: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, SessionError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SessionError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            participant: find("participant")?,
            condition: find("condition")?,
            trial: find("trial")?,
            tau: find("tau")?,
            t: find("t")?,
            y_t: find("y_t")?,
            x_p: find("x_p")?,
            y_p: find("y_p")?,
        })
    }
}

/// Load a session log from a CSV file.
///
/// Extra columns are ignored. Rows are kept in file order; grouping and
/// time-ordering happen in [`group_trials`].
pub fn load_session(path: &Path) -> Result<LoadedSession, SessionError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SessionError::Io(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| SessionError::Csv(e.to_string()))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut dropped_rows = 0;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                dropped_rows += 1;
                continue;
            }
        };

        match parse_row(&row, &columns) {
            Some(record) => records.push(record),
            None => dropped_rows += 1,
        }
    }

    Ok(LoadedSession {
        records,
        dropped_rows,
    })
}

/// Parse one row; `None` when any required numeric field is missing or malformed.
fn parse_row(row: &csv::StringRecord, columns: &ColumnIndex) -> Option<SessionRecord> {
    Some(SessionRecord {
        participant: row.get(columns.participant).unwrap_or("").to_string(),
        condition: row.get(columns.condition).unwrap_or("").to_string(),
        trial: parse_trial(row.get(columns.trial)?)?,
        tau: parse_float(row.get(columns.tau)?)?,
        t: parse_float(row.get(columns.t)?)?,
        y_t: parse_float(row.get(columns.y_t)?)?,
        x_p: parse_float(row.get(columns.x_p)?)?,
        y_p: parse_float(row.get(columns.y_p)?)?,
    })
}

/// Parse a finite float; NaN and infinities count as malformed.
fn parse_float(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a trial id. Integral floats such as `3.0` are accepted.
fn parse_trial(field: &str) -> Option<i64> {
    field.parse::<i64>().ok().or_else(|| {
        field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// Group records into trials keyed by `(participant, condition, trial)`.
///
/// Trials come back in key order, each with its samples sorted by timestamp.
/// Never produces an empty trial.
pub fn group_trials(records: Vec<SessionRecord>) -> Vec<Trial> {
    let mut groups: BTreeMap<TrialKey, Vec<SessionRecord>> = BTreeMap::new();
    for record in records {
        let key = TrialKey {
            participant: record.participant.clone(),
            condition: record.condition.clone(),
            trial: record.trial,
        };
        groups.entry(key).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, records)| {
            let mut trial = Trial { key, records };
            trial.sort_by_time();
            trial
        })
        .collect()
}

/// Session loading errors.
#[derive(Debug)]
pub enum SessionError {
    Io(String),
    Csv(String),
    MissingColumn(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "IO error: {e}"),
            SessionError::Csv(e) => write!(f, "CSV error: {e}"),
            SessionError::MissingColumn(name) => {
                write!(f, "required column '{name}' missing from header")
            }
        }
    }
}

impl std::error::Error for SessionError {}
