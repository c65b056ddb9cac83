//! Small "life facts" derived from a birthday: zodiac sign, next birthday,
//! heartbeat estimate and milestones.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

use crate::age::anniversary;
use crate::error::Result;

pub const DEFAULT_BPM: u32 = 72;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// Each sign holds until the (month, day) cutover, exclusive.
const ZODIAC_CUTOVERS: [(ZodiacSign, (u32, u32)); 13] = [
    (ZodiacSign::Capricorn, (1, 20)),
    (ZodiacSign::Aquarius, (2, 19)),
    (ZodiacSign::Pisces, (3, 21)),
    (ZodiacSign::Aries, (4, 20)),
    (ZodiacSign::Taurus, (5, 21)),
    (ZodiacSign::Gemini, (6, 21)),
    (ZodiacSign::Cancer, (7, 23)),
    (ZodiacSign::Leo, (8, 23)),
    (ZodiacSign::Virgo, (9, 23)),
    (ZodiacSign::Libra, (10, 23)),
    (ZodiacSign::Scorpio, (11, 22)),
    (ZodiacSign::Sagittarius, (12, 22)),
    (ZodiacSign::Capricorn, (12, 32)),
];

const MILESTONES: [(i64, &str); 5] = [
    (3650, "You have lived over 10 years!"),
    (7300, "Two decades of memories!"),
    (10950, "30 Years Strong!"),
    (14600, "40 years of life experience!"),
    (18250, "Half a century!"),
];

impl ZodiacSign {
    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn zodiac_sign(date: impl Datelike) -> ZodiacSign {
    let key = (date.month(), date.day());
    ZODIAC_CUTOVERS
        .iter()
        .find(|(_, cutover)| key < *cutover)
        .map(|(sign, _)| *sign)
        .unwrap_or(ZodiacSign::Capricorn)
}

/// The next birthday on or after `today`.
pub fn next_anniversary(birth: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    let birth = birth.and_time(NaiveTime::MIN);
    let this_year = anniversary(birth, today.year() - birth.year())?.date();
    if this_year >= today {
        return Ok(this_year);
    }
    Ok(anniversary(birth, today.year() + 1 - birth.year())?.date())
}

pub fn days_until(next: NaiveDate, today: NaiveDate) -> i64 {
    (next - today).num_days()
}

/// Saturates at `i64::MAX` rather than overflowing.
pub fn estimate_heartbeats(days: i64, avg_bpm: u32) -> i64 {
    days.saturating_mul(MINUTES_PER_DAY)
        .saturating_mul(i64::from(avg_bpm))
}

/// Milestone facts unlocked by `days` lived, in threshold order.
pub fn milestones(days: i64) -> Vec<&'static str> {
    MILESTONES
        .iter()
        .filter(|(threshold, _)| days >= *threshold)
        .map(|(_, fact)| *fact)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zodiac_boundaries() {
        assert_eq!(zodiac_sign(d(2000, 12, 21)), ZodiacSign::Sagittarius);
        assert_eq!(zodiac_sign(d(2000, 12, 22)), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(d(2000, 1, 19)), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(d(2000, 1, 20)).to_string(), "Aquarius");
        assert_eq!(zodiac_sign(d(2000, 12, 31)), ZodiacSign::Capricorn);
        assert_eq!(zodiac_sign(d(2000, 7, 22)), ZodiacSign::Cancer);
        assert_eq!(zodiac_sign(d(2000, 7, 23)), ZodiacSign::Leo);
    }

    #[test]
    fn next_birthday_rolls_over_after_it_passes() {
        let birth = d(1990, 5, 15);
        assert_eq!(next_anniversary(birth, d(2024, 3, 1)).unwrap(), d(2024, 5, 15));
        assert_eq!(next_anniversary(birth, d(2024, 5, 15)).unwrap(), d(2024, 5, 15));
        assert_eq!(next_anniversary(birth, d(2024, 5, 16)).unwrap(), d(2025, 5, 15));
    }

    #[test]
    fn next_birthday_for_leap_day() {
        let birth = d(2000, 2, 29);
        assert_eq!(next_anniversary(birth, d(2023, 1, 1)).unwrap(), d(2023, 2, 28));
        assert_eq!(next_anniversary(birth, d(2023, 3, 1)).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn counts_days_until() {
        assert_eq!(days_until(d(2025, 1, 1), d(2024, 12, 31)), 1);
        assert_eq!(days_until(d(2024, 5, 15), d(2024, 5, 15)), 0);
    }

    #[test]
    fn heartbeats() {
        assert_eq!(estimate_heartbeats(1, DEFAULT_BPM), 103_680);
        assert_eq!(estimate_heartbeats(0, DEFAULT_BPM), 0);
        assert_eq!(estimate_heartbeats(10, 60), 864_000);
    }

    #[test]
    fn heartbeats_saturate_instead_of_overflowing() {
        assert_eq!(estimate_heartbeats(3_652_424, u32::MAX), i64::MAX);
        assert_eq!(estimate_heartbeats(i64::MAX, 1), i64::MAX);
    }

    #[test]
    fn milestones_accumulate_in_order() {
        assert!(milestones(3649).is_empty());
        assert_eq!(milestones(3650), vec!["You have lived over 10 years!"]);
        let all = milestones(20_000);
        assert_eq!(all.len(), 5);
        assert_eq!(all.last(), Some(&"Half a century!"));
    }
}
