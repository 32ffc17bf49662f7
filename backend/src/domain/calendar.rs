//! Calendar arithmetic for stays.
//!
//! `CalendarDate` is the only date type the domain works with. Every value is
//! a valid Gregorian date by construction, so comparisons and interval math
//! never have to deal with a "missing" date. Dates cross the storage and DTO
//! boundaries as `DD/MM/YYYY` strings.
//!
//! Comparisons go through [`CalendarDate::ordinal`], the number of days since
//! 01/01/1900. The ordinal is what the availability checks compare, so it is
//! computed in closed form instead of walking the calendar.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Date '{0}' is not in DD/MM/YYYY format")]
    Malformed(String),
    #[error("{day:02}/{month:02}/{year} is not a valid calendar date")]
    OutOfRange { day: u32, month: u32, year: u32 },
}

/// A day on the Gregorian calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    day: u32,
    month: u32,
    year: u32,
}

impl CalendarDate {
    /// Build a date, rejecting anything that is not on the calendar
    pub fn new(day: u32, month: u32, year: u32) -> Result<Self, DateParseError> {
        if !Self::is_valid(day, month, year) {
            return Err(DateParseError::OutOfRange { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    /// Parse a `DD/MM/YYYY` string. Single-digit day and month are accepted.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let trimmed = text.trim();
        let malformed = || DateParseError::Malformed(text.to_string());

        let mut parts = trimmed.split('/');
        let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(d), Some(m), Some(y), None) => (d, m, y),
            _ => return Err(malformed()),
        };

        let number = |part: &str, max_len: usize| -> Result<u32, DateParseError> {
            if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u32>().map_err(|_| malformed())
        };

        Self::new(number(day, 2)?, number(month, 2)?, number(year, 4)?)
    }

    pub fn is_valid(day: u32, month: u32, year: u32) -> bool {
        if year == 0 || !(1..=12).contains(&month) || day == 0 {
            return false;
        }
        day <= Self::days_in_month(month, year)
    }

    pub fn is_leap_year(year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Number of days in a month (1-12) of the given year
    pub fn days_in_month(month: u32, year: u32) -> u32 {
        if month == 2 && Self::is_leap_year(year) {
            29
        } else {
            MONTH_LENGTHS[(month.clamp(1, 12) - 1) as usize]
        }
    }

    /// Today's date in the local timezone
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self {
            day: now.day(),
            month: now.month(),
            year: now.year().max(1) as u32,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Days elapsed since 01/01/1900. Earlier dates yield negative ordinals.
    pub fn ordinal(&self) -> i64 {
        let day_of_year: i64 = (1..self.month)
            .map(|m| Self::days_in_month(m, self.year) as i64)
            .sum::<i64>()
            + self.day as i64
            - 1;
        days_before_year(self.year) - days_before_year(1900) + day_of_year
    }

    /// The date `days` days after this one
    pub fn add_days(&self, days: u32) -> Self {
        let mut result = *self;
        let mut remaining = days;
        while remaining > 0 {
            let left_in_month = Self::days_in_month(result.month, result.year) - result.day;
            if remaining <= left_in_month {
                result.day += remaining;
                break;
            }
            remaining -= left_in_month + 1;
            result.day = 1;
            if result.month == 12 {
                result.month = 1;
                result.year += 1;
            } else {
                result.month += 1;
            }
        }
        result
    }

    /// Last occupied night of a stay that starts on this date
    ///
    /// A stay always covers at least one night, so `nights` of 0 is treated
    /// like a single night.
    pub fn end_of_stay(&self, nights: u32) -> Self {
        self.add_days(nights.saturating_sub(1))
    }

    /// Whether this date is strictly before today
    pub fn has_elapsed(&self) -> bool {
        self.has_elapsed_as_of(&Self::today())
    }

    pub fn has_elapsed_as_of(&self, today: &CalendarDate) -> bool {
        self < today
    }

    /// Long-form rendering, e.g. "Tuesday, 10 June 2025"
    pub fn format_long(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day) {
            Some(date) => date.format("%A, %-d %B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

/// Days from 01/01/0001 up to (not including) 01/01 of `year`
fn days_before_year(year: u32) -> i64 {
    let y = year as i64 - 1;
    y * 365 + y / 4 - y / 100 + y / 400
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}
