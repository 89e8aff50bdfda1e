//! Parser for the Apache `mod_status` page.
//!
//! The machine-readable status page (`/server-status/?auto`) is a loose mix of
//! `Key: Value` lines and, on some builds, HTML table rows. This module turns
//! such a document into [`StatusFields`] without touching the network or the
//! metrics library, so it can be tested in isolation.

use thiserror::Error;
use tracing::debug;

/// Marker cell that identifies the aggregated scoreboard row.
const SUM_ROW_MARKER: &str = "<td>Sum</td>";

/// Number of cells a Sum row must have to be usable.
const SUM_ROW_CELLS: usize = 8;

const SUM_BUSY_THREADS_COLUMN: usize = 3;
const SUM_IDLE_THREADS_COLUMN: usize = 4;

/// A recognized field carried a value that cannot be exported.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid value {value:?} for field {key:?}")]
pub struct ParseError {
    pub key: String,
    pub value: String,
}

/// Numeric fields extracted from one status document.
///
/// Every field is optional: a page only yields what it actually reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusFields {
    pub accesses_total: Option<f64>,
    pub kbytes_total: Option<f64>,
    pub uptime_seconds: Option<f64>,
    pub busy_workers: Option<f64>,
    pub idle_workers: Option<f64>,
    pub busy_threads: Option<f64>,
    pub idle_threads: Option<f64>,
}

impl StatusFields {
    /// True when no recognized field was found.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Splits a line on its first colon into a trimmed key and value.
///
/// A line without a colon is returned unchanged as the key with an empty value.
pub fn split_kv(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (line, ""),
    }
}

/// Extracts the `<td>...</td>` cells of a table row, in order.
///
/// Only pieces with exactly one closing `</td>` count as cells.
pub fn split_row(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    line.split("<td>")
        .filter_map(|piece| {
            let parts: Vec<&str> = piece.split("</td>").collect();
            if parts.len() == 2 {
                Some(parts[0].trim().to_string())
            } else {
                None
            }
        })
        .collect()
}

fn parse_gauge(key: &str, value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|_| ParseError {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Like [`parse_gauge`], but also rejects NaN and negative readings:
/// `Counter::inc_by` asserts on a negative delta, and a reset counter
/// cannot be moved to NaN.
fn parse_counter(key: &str, value: &str) -> Result<f64, ParseError> {
    let parsed = parse_gauge(key, value)?;
    if parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(ParseError {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn parse_sum_row(line: &str, fields: &mut StatusFields) -> Result<(), ParseError> {
    let cells = split_row(line);
    if cells.len() != SUM_ROW_CELLS {
        debug!(
            "Ignoring Sum row with {} cells (expected {})",
            cells.len(),
            SUM_ROW_CELLS
        );
        return Ok(());
    }

    debug!("Sum row: {:?}", cells);

    fields.busy_threads = Some(parse_gauge(
        "Sum[3]",
        &cells[SUM_BUSY_THREADS_COLUMN],
    )?);
    fields.idle_threads = Some(parse_gauge(
        "Sum[4]",
        &cells[SUM_IDLE_THREADS_COLUMN],
    )?);
    Ok(())
}

/// Parses a full status document.
///
/// The first unparsable value aborts the whole document; no partial result
/// is returned. Unknown keys are skipped, and repeated keys keep the last value.
pub fn parse_status(document: &str) -> Result<StatusFields, ParseError> {
    let mut fields = StatusFields::default();

    for line in document.split('\n') {
        // The marker may sit in any cell; the match is deliberately loose.
        if line.contains(SUM_ROW_MARKER) {
            parse_sum_row(line, &mut fields)?;
            continue;
        }

        let (key, value) = split_kv(line);
        match key {
            "Total Accesses" => fields.accesses_total = Some(parse_counter(key, value)?),
            "Total kBytes" => fields.kbytes_total = Some(parse_counter(key, value)?),
            "Uptime" => fields.uptime_seconds = Some(parse_counter(key, value)?),
            "BusyWorkers" => fields.busy_workers = Some(parse_gauge(key, value)?),
            "IdleWorkers" => fields.idle_workers = Some(parse_gauge(key, value)?),
            _ => {}
        }
    }

    Ok(fields)
}
