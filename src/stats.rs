//! Everything the life report shows, gathered from one birthday.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::age::compute_breakdown;
use crate::error::Result;
use crate::facts::{
    ZodiacSign, days_until, estimate_heartbeats, milestones, next_anniversary, zodiac_sign,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeStats {
    pub birthday: NaiveDate,
    pub years: i64,
    pub months_total: i64,
    pub total_days: i64,
    pub zodiac: ZodiacSign,
    pub next_birthday: NaiveDate,
    pub days_until_birthday: i64,
    pub heartbeats: i64,
    pub milestones: Vec<&'static str>,
}

impl LifeStats {
    pub fn gather(birthday: NaiveDate, today: NaiveDate, bpm: u32) -> Result<Self> {
        let age = compute_breakdown(
            birthday.and_time(NaiveTime::MIN),
            today.and_time(NaiveTime::MIN),
        )?;
        let next_birthday = next_anniversary(birthday, today)?;

        Ok(Self {
            birthday,
            years: age.years,
            months_total: age.months_total,
            total_days: age.total_days,
            zodiac: zodiac_sign(birthday),
            next_birthday,
            days_until_birthday: days_until(next_birthday, today),
            heartbeats: estimate_heartbeats(age.total_days, bpm),
            milestones: milestones(age.total_days),
        })
    }
}
