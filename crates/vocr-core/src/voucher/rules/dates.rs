//! Voucher date extraction.
//!
//! A date token is tried against [`DATE_FORMATS`] in order and the first
//! format that yields a valid calendar date wins. The order matters for
//! ambiguous tokens: `01-02-03` is read as 1 February 2003 because the
//! day-first two-digit-year format is tried before the ISO one.

use chrono::NaiveDate;

use super::patterns::{DATE_COMPACT, DATE_TOKEN};
use super::LineMatcher;

/// Number of digits a format expects in the year field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearDigits {
    Four,
    Two,
}

/// One calendar format in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Day, month, year separated by `separator`.
    DayMonthYear { separator: char, year: YearDigits },
    /// Four-digit year, month, day separated by `separator`.
    YearMonthDay { separator: char },
}

/// Formats tried, in order, for every date token.
pub const DATE_FORMATS: [DateFormat; 5] = [
    DateFormat::DayMonthYear { separator: '-', year: YearDigits::Four },
    DateFormat::DayMonthYear { separator: '/', year: YearDigits::Four },
    DateFormat::DayMonthYear { separator: '-', year: YearDigits::Two },
    DateFormat::DayMonthYear { separator: '/', year: YearDigits::Two },
    DateFormat::YearMonthDay { separator: '-' },
];

impl DateFormat {
    /// Parse `token` strictly in this format.
    pub fn parse(&self, token: &str) -> Option<NaiveDate> {
        let separator = match self {
            DateFormat::DayMonthYear { separator, .. } | DateFormat::YearMonthDay { separator } => {
                *separator
            }
        };

        let parts: Vec<&str> = token.split(separator).collect();
        let [a, b, c] = parts.as_slice() else {
            return None;
        };

        match self {
            DateFormat::DayMonthYear { year, .. } => {
                let day = day_or_month(a)?;
                let month = day_or_month(b)?;
                let year = match year {
                    YearDigits::Four => four_digit_year(c)?,
                    YearDigits::Two => two_digit_year(c)?,
                };
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::YearMonthDay { .. } => {
                let year = four_digit_year(a)?;
                let month = day_or_month(b)?;
                let day = day_or_month(c)?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

/// Parse a date token with the fallback chain, then as contiguous `DDMMYYYY`.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS.iter().find_map(|format| format.parse(token)) {
        return Some(date);
    }

    let caps = DATE_COMPACT.captures(token)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Matches the first date token on a line and validates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher;

impl LineMatcher for DateMatcher {
    type Output = NaiveDate;

    fn try_match(&self, line: &str) -> Option<NaiveDate> {
        let token = DATE_TOKEN.find(line)?;
        parse_date_token(token.as_str())
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn day_or_month(s: &str) -> Option<u32> {
    if s.len() > 2 || !all_digits(s) {
        return None;
    }
    s.parse().ok()
}

fn four_digit_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !all_digits(s) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    (year >= 1).then_some(year)
}

fn two_digit_year(s: &str) -> Option<i32> {
    if s.len() != 2 || !all_digits(s) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    // 69-99 fall in the 1900s, 00-68 in the 2000s
    Some(if year >= 69 { 1900 + year } else { 2000 + year })
}
