//! age.rs
//!
//! This module provides the calendar arithmetic behind every age report:
//!     "X years, Y months, Z days, H hours, M minutes, S seconds"
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so the anniversary and month-clipping rules are implemented
//! manually on top of `NaiveDateTime`.
//!
//! This logic correctly handles:
//!   • Feb 29 birthdays (anniversary falls back to Feb 28 in common years)
//!   • month-end clipping (Jan 31 + 1 month → Feb 28/29)
//!   • leap years
//!   • varying month lengths

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::{AgeError, Result};

/// Calendar date with a time of day. Date-only input lands on midnight.
pub type Instant = NaiveDateTime;

pub const SECONDS_PER_DAY: i64 = 86_400;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").expect("valid date regex"));

const INSTANT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Elapsed time between two instants, decomposed into calendar units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_days: i64,
    pub total_seconds: i64,
    /// Whole months since birth; informational only.
    pub months_total: i64,
}

impl AgeBreakdown {
    /// Returns the full breakdown as a human string
    pub fn describe(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.describe_short(),
            unit(self.hours, "hour"),
            unit(self.minutes, "minute"),
            unit(self.seconds, "second")
        )
    }

    /// Returns a human age as a string (years, months and days only)
    pub fn describe_short(&self) -> String {
        format!(
            "{}, {}, {}",
            unit(self.years, "year"),
            unit(self.months, "month"),
            unit(self.days, "day")
        )
    }
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

pub fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// "1 day", "3 days"
pub fn unit(n: i64, singular: &str) -> String {
    format!("{n} {singular}{}", plural(n))
}

/// Parses `YYYY-MM-DD` or `YYYY/MM/DD` into an instant at midnight.
pub fn parse_date(text: &str) -> Result<Instant> {
    let input = text.trim();
    let caps = DATE_RE.captures(input).ok_or_else(|| AgeError::Format {
        input: input.to_string(),
    })?;

    let field = |i: usize| -> Result<u32> {
        caps[i].parse::<u32>().map_err(|_| AgeError::Format {
            input: input.to_string(),
        })
    };
    let year = field(1)? as i32;
    let month = field(2)?;
    let day = field(3)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or(AgeError::InvalidDate { year, month, day })
}

/// Parses a full instant (`YYYY-MM-DDTHH:MM:SS` or with a space), falling
/// back to a plain date at midnight.
pub fn parse_instant(text: &str) -> Result<Instant> {
    let input = text.trim();
    for format in INSTANT_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(instant);
        }
    }
    parse_date(input)
}

/// Adds (or subtracts, for negative `delta`) whole months, clipping the day
/// to the end of the target month. Time of day is kept.
pub fn add_months(instant: Instant, delta: i64) -> Result<Instant> {
    let index = (i64::from(instant.year()) * 12 + i64::from(instant.month0()))
        .checked_add(delta)
        .ok_or(AgeError::OutOfRange)?;
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| AgeError::OutOfRange)?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = instant.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(instant.time()))
        .ok_or(AgeError::OutOfRange)
}

/// Birth shifted by whole years. Feb 29 becomes Feb 28 in common years.
pub fn anniversary(birth: Instant, years: i32) -> Result<Instant> {
    let year = birth.year().checked_add(years).ok_or(AgeError::OutOfRange)?;
    let day = if birth.month() == 2 && birth.day() == 29 && !is_leap_year(year) {
        28
    } else {
        birth.day()
    };

    NaiveDate::from_ymd_opt(year, birth.month(), day)
        .map(|d| d.and_time(birth.time()))
        .ok_or(AgeError::OutOfRange)
}

/// Decomposes the time elapsed from `birth` to `now`.
pub fn compute_breakdown(birth: Instant, now: Instant) -> Result<AgeBreakdown> {
    if birth > now {
        return Err(AgeError::FutureDate { birth, now });
    }

    let elapsed = now - birth;
    let total_seconds = elapsed.num_seconds();
    let total_days = elapsed.num_days();

    let mut years = now.year() - birth.year();
    if anniversary(birth, years)? > now {
        years -= 1;
    }

    let mut months_total = i64::from(now.year() - birth.year()) * 12 + i64::from(now.month())
        - i64::from(birth.month());
    // Same day of month still counts as "not yet" until the birth time is reached.
    if now.day() < birth.day() || (now.day() == birth.day() && now.time() < birth.time()) {
        months_total -= 1;
    }

    let years = i64::from(years);
    // A Feb 29 anniversary clipped to Feb 28 already completes the year.
    let months = (months_total - years * 12).clamp(0, 11);

    let month_anniversary = add_months(birth, years * 12 + months)?;
    // Whole elapsed days, not a calendar-date difference: a birth time later in
    // the day than `now` would otherwise count one day too many while the hours
    // below already cover the partial day. Equal for midnight births.
    let days = (now - month_anniversary).num_days();
    debug_assert!(days >= 0, "month anniversary must not pass the reference instant");

    let seconds_in_day = total_seconds - total_days * SECONDS_PER_DAY;

    let breakdown = AgeBreakdown {
        years,
        months,
        days,
        hours: seconds_in_day / 3600,
        minutes: (seconds_in_day % 3600) / 60,
        seconds: seconds_in_day % 60,
        total_days,
        total_seconds,
        months_total,
    };
    tracing::debug!(%birth, %now, ?breakdown, "computed age breakdown");
    Ok(breakdown)
}

/// Approximate birth instant for someone who knows only their age.
pub fn birth_from_age(now: Instant, years: u32, months: u32, days: u32) -> Result<Instant> {
    let months_back = i64::from(years) * 12 + i64::from(months);
    add_months(now, -months_back)?
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or(AgeError::OutOfRange)
}

/// Leap years in `[start_year, end_year]`, ascending.
pub fn list_leap_years(start_year: i32, end_year: i32) -> Vec<i32> {
    (start_year..=end_year).filter(|&y| is_leap_year(y)).collect()
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
