//! ASCII grid header parsing.
//!
//! The header is a fixed block of six `key value` lines. Keys are matched
//! case-insensitively and lines that are not a single key/value pair are
//! ignored, which tolerates the small dialect differences between writers.

use std::collections::HashMap;
use std::io::BufRead;

use grid_common::{Anchor, GridHeader, ImportError, ImportResult, Xy};
use nom::bytes::complete::take_till1;
use nom::character::complete::multispace1;
use nom::combinator::all_consuming;
use nom::sequence::separated_pair;
use nom::IResult;
use tracing::debug;

/// Number of lines occupied by the header.
pub const HEADER_LINES: usize = 6;

/// Read exactly [`HEADER_LINES`] lines and build a [`GridHeader`].
///
/// The reader is left at the first body row; nothing past the sixth line is
/// consumed.
pub fn parse_header<R: BufRead>(reader: &mut R) -> ImportResult<GridHeader> {
    let mut meta = HashMap::new();
    let mut line = String::new();

    for line_no in 0..HEADER_LINES {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            return Err(ImportError::UnreadableFile(format!(
                "file ended after {} of {} header lines",
                line_no, HEADER_LINES
            )));
        }

        match key_value(line.trim()) {
            Ok((_, (key, value))) => {
                meta.insert(key.to_lowercase(), value.to_string());
            }
            Err(_) => debug!(line = line_no + 1, "Skipping unrecognized header line"),
        }
    }

    debug!(meta = ?meta, "Parsed ASCII grid header");
    header_from_meta(&meta)
}

/// Build a header from the lower-cased key/value map.
pub fn header_from_meta(meta: &HashMap<String, String>) -> ImportResult<GridHeader> {
    let nrows = required_count(meta, "nrows")?;
    let ncols = required_count(meta, "ncols")?;
    let cellsize = required_number(meta, "cellsize")?;
    let nodata_value = required_number(meta, "nodata_value")?;

    let anchor = match (
        anchor_pair(meta, "xllcorner", "yllcorner")?,
        anchor_pair(meta, "xllcenter", "yllcenter")?,
    ) {
        (Some(corner), None) => Anchor::Corner(corner),
        (None, Some(center)) => Anchor::Center(center),
        (Some(_), Some(_)) => {
            return Err(ImportError::malformed_header(
                "both xllcorner/yllcorner and xllcenter/yllcenter are present",
            ))
        }
        (None, None) => {
            return Err(ImportError::malformed_header(
                "missing xllcorner/yllcorner or xllcenter/yllcenter",
            ))
        }
    };

    GridHeader::new(nrows, ncols, cellsize, nodata_value, anchor)
}

/// `key <whitespace> value` with no whitespace inside either token.
fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(token, multispace1, token))(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn required<'a>(meta: &'a HashMap<String, String>, key: &str) -> ImportResult<&'a str> {
    meta.get(key)
        .map(String::as_str)
        .ok_or_else(|| ImportError::malformed_header(format!("missing required key '{}'", key)))
}

fn required_number(meta: &HashMap<String, String>, key: &str) -> ImportResult<f64> {
    let raw = required(meta, key)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ImportError::malformed_header(format!(
            "'{}' is not a finite number: {:?}",
            key, raw
        ))),
    }
}

fn required_count(meta: &HashMap<String, String>, key: &str) -> ImportResult<usize> {
    let raw = required(meta, key)?;
    raw.parse::<usize>().map_err(|_| {
        ImportError::malformed_header(format!(
            "'{}' is not a non-negative integer: {:?}",
            key, raw
        ))
    })
}

/// Both keys of an anchor pair, `None` when neither is present.
fn anchor_pair(
    meta: &HashMap<String, String>,
    x_key: &str,
    y_key: &str,
) -> ImportResult<Option<Xy>> {
    match (meta.contains_key(x_key), meta.contains_key(y_key)) {
        (false, false) => Ok(None),
        (true, true) => Ok(Some(Xy::new(
            required_number(meta, x_key)?,
            required_number(meta, y_key)?,
        ))),
        (true, false) => Err(ImportError::malformed_header(format!(
            "'{}' present without '{}'",
            x_key, y_key
        ))),
        (false, true) => Err(ImportError::malformed_header(format!(
            "'{}' present without '{}'",
            y_key, x_key
        ))),
    }
}
