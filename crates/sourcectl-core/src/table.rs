//! Parsing of the fixed-width `source list` table.
//!
//! The package manager prints sources as a human-readable table:
//!
//! ```text
//! Name    Argument
//! --------------------------------------------------
//! msstore https://storeedgefd.dsx.mp.microsoft.com/v9.0
//! winget  https://cdn.winget.microsoft.com/cache
//! ```
//!
//! No column widths are published, so the boundary between the two columns is
//! inferred at parse time. A separator split into several dash runs
//! (`----  ----`) marks the second column where its second run starts.
//! A solid separator carries no boundary, so the column is taken from the
//! header row directly above it.

use tracing::trace;

use crate::{error::TableParseError, source::Source};

/// Shortest dash run that marks the separator row.
const SEPARATOR_RUN: &str = "---";

/// Turns the captured output of a `source list` invocation into records.
pub trait SourceTableParser {
    fn parse(&self, lines: &[String]) -> Result<Vec<Source>, TableParseError>;
}

/// Column-inferring parser for the two-column `name  url` table.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedWidthTableParser;

impl SourceTableParser for FixedWidthTableParser {
    fn parse(&self, lines: &[String]) -> Result<Vec<Source>, TableParseError> {
        parse_source_table(lines)
    }
}

/// Parses a `source list` table.
///
/// Lines above the header are ignored, every non-blank line below the
/// separator becomes one [`Source`] in output order. Rows too short to reach
/// the second column produce an empty `url`.
///
/// # Errors
///
/// * [`TableParseError::Empty`] if there are no lines at all
/// * [`TableParseError::MissingSeparator`] if no line contains a dash run
/// * [`TableParseError::MissingHeader`] if the separator is the first line
/// * [`TableParseError::MissingUrlColumn`] if neither the separator nor the header
///   marks a second column
pub fn parse_source_table<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Source>, TableParseError> {
    if lines.is_empty() {
        return Err(TableParseError::Empty);
    }

    let separator_index = lines
        .iter()
        .position(|line| line.as_ref().contains(SEPARATOR_RUN))
        .ok_or(TableParseError::MissingSeparator)?;

    let header = match separator_index.checked_sub(1) {
        Some(index) => lines[index].as_ref(),
        None => {
            return Err(TableParseError::MissingHeader {
                line: separator_index + 1,
            })
        }
    };
    let separator = lines[separator_index].as_ref();

    let url_column = separator_column(separator)
        .or_else(|| header_column(header))
        .ok_or_else(|| {
            TableParseError::MissingUrlColumn {
                header: header.trim().to_string(),
            }
        })?;
    trace!(separator_index, url_column, "inferred source table layout");

    let sources: Vec<Source> = lines[separator_index + 1..]
        .iter()
        .map(AsRef::as_ref)
        .filter(|row| !row.trim().is_empty())
        .map(|row| {
            let (name, url) = split_at_column(row, url_column);
            Source::new(name.trim(), url.trim())
        })
        .collect();

    trace!(count = sources.len(), "parsed source rows");
    Ok(sources)
}

/// Column (in characters) where the second dash run of the separator starts.
fn separator_column(separator: &str) -> Option<usize> {
    let mut seen_run = false;
    let mut in_run = false;
    for (column, c) in separator.chars().enumerate() {
        match (c == '-', in_run) {
            (true, false) if seen_run => return Some(column),
            (true, false) => {
                seen_run = true;
                in_run = true;
            }
            (false, true) => in_run = false,
            _ => {}
        }
    }
    None
}

/// Column (in characters) where the second header label starts.
///
/// Leading indentation is skipped; the column is the first non-space
/// character that follows a space after the first label.
fn header_column(header: &str) -> Option<usize> {
    let mut seen_label = false;
    let mut seen_space = false;
    for (column, c) in header.chars().enumerate() {
        if c == ' ' {
            seen_space = seen_label;
        } else if seen_space {
            return Some(column);
        } else {
            seen_label = true;
        }
    }
    None
}

/// Splits `row` before its `column`-th character, clamping to the row length.
fn split_at_column(row: &str, column: usize) -> (&str, &str) {
    match row.char_indices().nth(column) {
        Some((index, _)) => row.split_at(index),
        None => (row, ""),
    }
}
