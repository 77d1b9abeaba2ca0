use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of a padded version code: `DDMMYYYYR`.
pub const CODE_WIDTH: usize = 9;

const TWO_DIGIT_YEAR_LIMIT: i32 = 100;
const TWO_DIGIT_YEAR_BASE: i32 = 1900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionCodeError {
    #[error("version code is empty")]
    Empty,
    #[error("version code must contain only digits, got: {input}")]
    NonDigit { input: String },
    #[error("version code has {len} digits, expected at most 9: {input}")]
    TooLong { input: String, len: usize },
    #[error("version code {code} does not encode a valid calendar date")]
    InvalidDate { code: String },
}

/// How out-of-range day and month fields are treated when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    /// Overflowing fields roll into the neighbouring month or year
    /// (`32.01.2026` decodes as `01.02.2026`) and years `0000` to `0099`
    /// stand for 1900 to 1999.
    #[default]
    Lenient,
    /// Only real calendar dates are accepted.
    Strict,
}

/// A nine digit, left zero-padded `DDMMYYYYR` version code.
///
/// The format has no delimiters, so fields are located purely by position.
/// Shorter inputs are assumed to have lost their leading zeros and are padded;
/// longer inputs are rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionCode(String);

impl VersionCode {
    /// Validate and pad a raw code.
    ///
    /// # Errors
    /// Returns an error when the input is empty, contains anything other than
    /// ASCII digits, or has more than nine digits.
    pub fn new(raw: &str) -> Result<Self, VersionCodeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VersionCodeError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionCodeError::NonDigit {
                input: trimmed.to_string(),
            });
        }
        if trimmed.len() > CODE_WIDTH {
            return Err(VersionCodeError::TooLong {
                input: trimmed.to_string(),
                len: trimmed.len(),
            });
        }

        Ok(Self(format!("{trimmed:0>CODE_WIDTH$}")))
    }

    /// Build a code from its integer form, restoring dropped leading zeros.
    ///
    /// # Errors
    /// Returns an error when the number has more than nine digits.
    pub fn from_number(number: u64) -> Result<Self, VersionCodeError> {
        Self::new(&number.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form of the padded code. Only meant for display and fallback
    /// reporting; ordering goes through [`ParsedVersion`].
    #[must_use]
    pub fn numeric(&self) -> u64 {
        self.0
            .bytes()
            .fold(0, |acc, digit| acc * 10 + u64::from(digit - b'0'))
    }

    fn fields(&self) -> (&str, &str, &str, &str) {
        (&self.0[0..2], &self.0[2..4], &self.0[4..8], &self.0[8..])
    }

    /// Decode with the default [`DateMode::Lenient`] rules.
    ///
    /// # Errors
    /// Returns an error when the date cannot be represented at all.
    pub fn parse(&self) -> Result<ParsedVersion, VersionCodeError> {
        self.parse_with(DateMode::Lenient)
    }

    /// Decode the positional fields into a calendar date and revision.
    ///
    /// # Errors
    /// Returns [`VersionCodeError::InvalidDate`] when `mode` is strict and the
    /// day/month fields do not form a real date.
    pub fn parse_with(&self, mode: DateMode) -> Result<ParsedVersion, VersionCodeError> {
        let (day, month, year, revision) = self.fields();
        let day = digits_value(day);
        let month = digits_value(month);
        let revision = digits_value(revision);
        let year = i32::try_from(digits_value(year)).map_err(|_| self.invalid_date())?;

        let date = match mode {
            DateMode::Lenient => rolled_date(year, month, day),
            DateMode::Strict => NaiveDate::from_ymd_opt(year, month, day),
        }
        .ok_or_else(|| self.invalid_date())?;

        Ok(ParsedVersion {
            date,
            revision,
            numeric_code: self.numeric(),
        })
    }

    /// Render as `DD.MM.YYYY (Rev. R)`.
    ///
    /// Works on the raw fields, so codes that are not valid dates still format.
    #[must_use]
    pub fn format(&self) -> String {
        let (day, month, year, revision) = self.fields();
        format!("{day}.{month}.{year} (Rev. {})", digits_value(revision))
    }

    fn invalid_date(&self) -> VersionCodeError {
        VersionCodeError::InvalidDate {
            code: self.0.clone(),
        }
    }
}

impl FromStr for VersionCode {
    type Err = VersionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded version code.
///
/// Ordered by date first; the revision only breaks ties between codes issued
/// on the same day. `numeric_code` never takes part in comparisons.
#[derive(Debug, Clone, Copy)]
pub struct ParsedVersion {
    pub date: NaiveDate,
    pub revision: u32,
    pub numeric_code: u64,
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.revision.cmp(&other.revision))
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

/// Parse a raw code string with lenient date handling.
///
/// # Errors
/// Returns an error when the input is not a valid version code.
pub fn parse_version_code(raw: &str) -> Result<ParsedVersion, VersionCodeError> {
    VersionCode::new(raw)?.parse()
}

/// Format a raw code string as `DD.MM.YYYY (Rev. R)`.
///
/// # Errors
/// Returns an error when the input is not a valid version code.
pub fn format_version_code(raw: &str) -> Result<String, VersionCodeError> {
    Ok(VersionCode::new(raw)?.format())
}

/// Order two raw codes: earlier date first, revision only on equal dates.
///
/// # Errors
/// Returns an error when either input is not a valid version code.
pub fn compare_version_codes(a: &str, b: &str) -> Result<Ordering, VersionCodeError> {
    let a = parse_version_code(a)?;
    let b = parse_version_code(b)?;
    Ok(a.cmp(&b))
}

fn digits_value(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

// Mirrors calendar arithmetic that normalises overflowing fields: month 0 is
// December of the previous year, day 0 is the last day of the previous month.
// Two-digit years belong to the 1900s.
fn rolled_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let year = if year < TWO_DIGIT_YEAR_LIMIT {
        year + TWO_DIGIT_YEAR_BASE
    } else {
        year
    };
    let start_of_year = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let start_of_month = match month.checked_sub(1) {
        Some(offset) => start_of_year.checked_add_months(Months::new(offset))?,
        None => start_of_year.checked_sub_months(Months::new(1))?,
    };
    start_of_month.checked_add_signed(TimeDelta::days(i64::from(day) - 1))
}
