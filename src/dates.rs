use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected MM/DD/YYYY, got {0:?}")]
    Shape(String),
    #[error("no such calendar date: {0:?}")]
    OutOfRange(String),
}

/// Parses a slash-separated `month/day/year` string.
///
/// Field positions are fixed; leading zeros are optional. Nothing is delegated
/// to a locale-aware parser, so `05/06/2024` is always the sixth of May.
pub fn parse_mdy(value: &str) -> Result<NaiveDate, DateError> {
    let trimmed = value.trim();
    let mut parts = trimmed.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateError::Shape(value.to_string()));
    };

    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| DateError::Shape(value.to_string()))?;
    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| DateError::Shape(value.to_string()))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| DateError::Shape(value.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(value.to_string()))
}

/// `MM/DD`, used for chart labels.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// `MM/DD/YYYY -Ddd`, used in the detail table.
pub fn detail_label(date: NaiveDate) -> String {
    date.format("%m/%d/%Y -%a").to_string()
}

/// `M/D/YYYY` without padding.
pub fn us_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
