//! Date helpers for observation queries
//!
//! Observation dates are stored as zero-padded `YYYY-MM-DD` strings, so string
//! comparison in SQL matches chronological order. Every date bound into a query
//! goes through [`format_date`] to keep that true.

use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date format: {0:?}, expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("Window of {days} days before {latest} is outside the supported calendar range")]
    OutOfRange { latest: String, days: u32 },
}

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
///
/// Rejects partial dates, signs, extra characters, year 0 and out of range
/// month/day values.
pub fn parse_date(input: &str) -> Result<Date, DateError> {
    let invalid = || DateError::InvalidDateFormat(input.to_owned());
    if !has_date_shape(input) {
        return Err(invalid());
    }
    let date = Date::parse(input, DATE_FORMAT).map_err(|_| invalid())?;
    if date.year() < 1 {
        return Err(invalid());
    }
    Ok(date)
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The date `days` days before `latest`.
pub fn window_start(latest: Date, days: u32) -> Result<Date, DateError> {
    latest
        .checked_sub(Duration::days(i64::from(days)))
        .ok_or_else(|| DateError::OutOfRange {
            latest: format_date(latest),
            days,
        })
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
