//! Parsers for movie-award data files.
//!
//! Two input shapes are supported:
//! - `;`-separated CSV with a header line: `year;title;studios;producers;winner`
//! - a JSON array of raw records, as served by the awards REST API
//!
//! Columns are matched by header name, so their order in the file does not
//! matter. Rows are parsed in parallel; ids follow line order.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

const CSV_SEPARATOR: char = ';';

/// Read a whole file as text, mapping a missing file to `FileNotFound`.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse a CSV file from disk
pub fn read_csv_file(path: &Path) -> Result<Vec<MovieRecord>> {
    let text = read_text(path)?;
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_csv_named(&text, &file)
}

/// Parse a JSON file from disk
pub fn read_json_file(path: &Path) -> Result<Vec<MovieRecord>> {
    let text = read_text(path)?;
    parse_json(&text)
}

/// Parse CSV text into records
pub fn parse_csv(text: &str) -> Result<Vec<MovieRecord>> {
    parse_csv_named(text, "<input>")
}

/// Column positions resolved from the header line
struct ColumnMap {
    year: usize,
    title: usize,
    studios: usize,
    producers: usize,
    winner: usize,
}

impl ColumnMap {
    fn from_header(header: &str, file: &str) -> Result<Self> {
        let positions: HashMap<&str, usize> = header
            .trim_start_matches('\u{feff}')
            .split(CSV_SEPARATOR)
            .map(str::trim)
            .enumerate()
            .map(|(idx, name)| (name, idx))
            .collect();

        let column = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| DataLoadError::MissingColumn {
                    file: file.to_string(),
                    column: name.to_string(),
                })
        };

        Ok(Self {
            year: column("year")?,
            title: column("title")?,
            studios: column("studios")?,
            producers: column("producers")?,
            winner: column("winner")?,
        })
    }
}

fn parse_csv_named(text: &str, file: &str) -> Result<Vec<MovieRecord>> {
    // Keep original line numbers for error messages, skip blank lines
    let mut lines = text
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = ColumnMap::from_header(header, file)?;
    let rows: Vec<(usize, &str)> = lines.collect();

    let movies = rows
        .par_iter()
        .enumerate()
        .map(|(idx, &(line_no, line))| parse_row(&columns, line, line_no, idx as MovieId + 1, file))
        .collect::<Result<Vec<MovieRecord>>>()?;

    debug!("Parsed {} movie records from {}", movies.len(), file);
    Ok(movies)
}

/// Parse one data line.
///
/// A missing `title`, `studios` or `producers` field is an error. A missing or
/// unparseable `year` becomes 0 and a missing `winner` becomes `false`.
fn parse_row(
    columns: &ColumnMap,
    line: &str,
    line_no: usize,
    id: MovieId,
    file: &str,
) -> Result<MovieRecord> {
    let values: Vec<&str> = line.split(CSV_SEPARATOR).map(str::trim).collect();

    let required = |idx: usize, field: &str| {
        values
            .get(idx)
            .map(|v| v.to_string())
            .ok_or_else(|| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Missing {}", field),
            })
    };

    Ok(MovieRecord {
        id,
        year: values.get(columns.year).map_or(0, |v| parse_year(v)),
        title: required(columns.title, "title")?,
        studios: required(columns.studios, "studios")?,
        producers: required(columns.producers, "producers")?,
        winner: values
            .get(columns.winner)
            .is_some_and(|v| v.eq_ignore_ascii_case("yes")),
    })
}

/// Parse the leading integer of a year field
///
/// Example: "1980" -> 1980
///          "1980 (tie)" -> 1980
///          "unknown" -> 0
///
/// Digits beyond the `Year` range saturate at its bounds.
fn parse_year(s: &str) -> Year {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    let year = if negative { -magnitude } else { magnitude };
    year.clamp(i64::from(Year::MIN), i64::from(Year::MAX)) as Year
}

/// Raw record shape accepted from JSON input
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    id: Option<MovieId>,
    year: Year,
    title: String,
    studios: String,
    producers: String,
    winner: bool,
}

/// Parse a JSON array of raw records.
///
/// Every field except `id` is required. Records without an id are numbered
/// in array order, starting after the largest explicit id, so they never
/// collide with one.
pub fn parse_json(text: &str) -> Result<Vec<MovieRecord>> {
    let raw: Vec<JsonRecord> = serde_json::from_str(text)?;
    let mut next_id = raw.iter().filter_map(|r| r.id).max().unwrap_or(0).saturating_add(1);
    let movies: Vec<MovieRecord> = raw
        .into_iter()
        .map(|r| {
            let id = r.id.unwrap_or_else(|| {
                let id = next_id;
                next_id = next_id.saturating_add(1);
                id
            });
            MovieRecord {
                id,
                year: r.year,
                title: r.title,
                studios: r.studios,
                producers: r.producers,
                winner: r.winner,
            }
        })
        .collect();
    debug!("Parsed {} movie records from JSON", movies.len());
    Ok(movies)
}
