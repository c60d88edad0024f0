use crate::models::Listing;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tracing::{debug, info, warn};

const DELIMITER: char = ',';

/// Why a data row was left out of the parsed dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RejectReason {
    FieldCount { expected: usize, found: usize },
    InvalidId(String),
    EmptyName,
    InvalidInteger { column: &'static str, value: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            RejectReason::InvalidId(value) => write!(f, "invalid id: {value:?}"),
            RejectReason::EmptyName => write!(f, "empty name"),
            RejectReason::InvalidInteger { column, value } => {
                write!(f, "invalid integer in {column}: {value:?}")
            }
        }
    }
}

impl Error for RejectReason {}

/// A skipped row. `line` is 1-based and counts the header as line 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: RejectReason,
}

/// Result of parsing a listings CSV
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub listings: Vec<Listing>,
    pub rejected: Vec<RejectedRow>,
}

/// Parse listing rows from comma separated text.
///
/// The first line is a header and only fixes the expected field count.
/// Columns are positional and quoting is not supported, so a comma inside a
/// value shifts the row. Malformed rows are skipped and reported in
/// `ParseOutcome::rejected`; blank lines are skipped silently. This never
/// fails.
///
/// Rows must be exactly as wide as the header, and only the first 16 fields
/// are read. A header with fewer than 16 columns therefore rejects every
/// row as a field-count mismatch.
pub fn parse_csv(text: &str) -> ParseOutcome {
    let lines: Vec<&str> = text
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut outcome = ParseOutcome::default();
    if lines.len() < 2 {
        debug!("No data rows in input");
        return outcome;
    }

    let expected = lines[0].split(DELIMITER).count();

    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        match parse_row(line, expected) {
            Ok(listing) => outcome.listings.push(listing),
            Err(reason) => {
                debug!("Skipping line {}: {}", line_no, reason);
                outcome.rejected.push(RejectedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    if outcome.rejected.is_empty() {
        info!("Parsed {} listings", outcome.listings.len());
    } else {
        warn!(
            "Parsed {} listings, skipped {} malformed rows",
            outcome.listings.len(),
            outcome.rejected.len()
        );
    }

    outcome
}

fn parse_row(line: &str, expected: usize) -> Result<Listing, RejectReason> {
    let values: Vec<&str> = line.split(DELIMITER).collect();
    if values.len() != expected {
        return Err(RejectReason::FieldCount {
            expected,
            found: values.len(),
        });
    }
    // Header may be wider than our schema, never narrower
    if values.len() < 16 {
        return Err(RejectReason::FieldCount {
            expected: 16,
            found: values.len(),
        });
    }

    let id = parse_int_prefix(values[0])
        .ok_or_else(|| RejectReason::InvalidId(values[0].to_string()))?;
    let name = strip_quotes(values[1]);
    if name.is_empty() {
        return Err(RejectReason::EmptyName);
    }

    Ok(Listing {
        id,
        name: name.to_string(),
        host_id: int_field("host_id", values[2])?,
        host_name: strip_quotes(values[3]).to_string(),
        neighbourhood_group: strip_quotes(values[4]).to_string(),
        neighbourhood: strip_quotes(values[5]).to_string(),
        latitude: parse_float_prefix(values[6]),
        longitude: parse_float_prefix(values[7]),
        room_type: strip_quotes(values[8]).to_string(),
        price: parse_float_prefix(values[9]),
        minimum_nights: int_field("minimum_nights", values[10])?,
        number_of_reviews: int_field("number_of_reviews", values[11])?,
        last_review: (!values[12].is_empty()).then(|| values[12].to_string()),
        reviews_per_month: (!values[13].is_empty()).then(|| parse_float_prefix(values[13])),
        calculated_host_listings_count: int_field("calculated_host_listings_count", values[14])?,
        availability_365: int_field("availability_365", values[15])?,
    })
}

fn int_field<T: TryFrom<i64>>(column: &'static str, raw: &str) -> Result<T, RejectReason> {
    parse_int_prefix(raw)
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| RejectReason::InvalidInteger {
            column,
            value: raw.to_string(),
        })
}

/// Remove one leading and one trailing quote (`"` or `'`)
fn strip_quotes(raw: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let raw = raw.strip_prefix(is_quote).unwrap_or(raw);
    raw.strip_suffix(is_quote).unwrap_or(raw)
}

/// Length of the leading `[+-]digits` run, or of `[+-]digits[.digits][e[+-]digits]`
/// when `fractional` is set. Zero if no digit was found.
fn numeric_prefix_len(s: &str, fractional: bool) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if !fractional {
        return if digits > 0 { end } else { 0 };
    }

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    end
}

/// Leading-integer parse: `"12abc"` is 12, `"4.5"` is 4, `"abc"` is None
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let len = numeric_prefix_len(s, false);
    if len == 0 {
        return None;
    }
    s[..len].parse().ok()
}

/// Leading-float parse, NaN when no number is present.
/// `Infinity` with an optional sign parses as an infinite value.
fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let len = numeric_prefix_len(s, true);
    if len == 0 {
        return parse_infinity_prefix(s).unwrap_or(f64::NAN);
    }
    s[..len].parse().unwrap_or(f64::NAN)
}

fn parse_infinity_prefix(s: &str) -> Option<f64> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    rest.starts_with("Infinity").then_some(sign * f64::INFINITY)
}
