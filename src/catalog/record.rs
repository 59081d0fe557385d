//! Pipe-delimited file records.
//!
//! ```text
//! B-111-111-111|title|publisher|year|copies|author|isbn[|YYYY-MM-DD]
//! P-222-222-222|title|publisher|year|copies|month|issue[|YYYY-MM-DD]
//! ```
//!
//! A trailing date marks the record as already restored. Periodical months
//! may be written as English month names; unknown names load as month 0.

use std::str::FromStr;

use chrono::NaiveDate;

use super::error::RecordError;
use super::title::{RestoredTitle, Title};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A parsed line of the catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Live(Title),
    Restored(RestoredTitle),
}

/// 1-based month number for an exact English month name, 0 when unknown
pub fn month_from_name(name: &str) -> i32 {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as i32 + 1)
        .unwrap_or(0)
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parse one line of the catalog file
pub fn parse_line(line: &str) -> Result<Record, RecordError> {
    let mut tokens: Vec<&str> = line.split('|').collect();
    // Empty fields after the title fields carry no data; the title fields
    // themselves may be empty
    while tokens.len() > 7 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    if tokens.len() < 7 {
        return Err(RecordError::MissingFields {
            found: tokens.len(),
        });
    }

    let year: i32 = number("year", tokens[3])?;
    let copies: u32 = number("copies", tokens[4])?;

    let title = if tokens[0].starts_with('P') {
        let month = tokens[5]
            .parse::<i32>()
            .unwrap_or_else(|_| month_from_name(tokens[5]));
        let issue: u32 = number("issue", tokens[6])?;
        Title::periodical(tokens[0], tokens[1], tokens[2], year, copies, month, issue)
    } else {
        Title::book(
            tokens[0], tokens[1], tokens[2], year, copies, tokens[5], tokens[6],
        )
    };

    match tokens.get(7) {
        Some(date) => {
            let restored_on = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                RecordError::InvalidDate {
                    value: date.to_string(),
                }
            })?;
            Ok(Record::Restored(RestoredTitle::new(title, restored_on)))
        }
        None => Ok(Record::Live(title)),
    }
}
