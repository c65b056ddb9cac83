pub mod age;
pub mod cli;
pub mod error;
pub mod facts;
pub mod interactive;
pub mod logger;
pub mod report;
pub mod stats;

pub use age::{
    AgeBreakdown, Instant, add_months, anniversary, birth_from_age, compute_breakdown,
    list_leap_years, parse_date, parse_instant,
};
pub use error::{AgeError, Result};
pub use facts::{ZodiacSign, estimate_heartbeats, milestones, next_anniversary, zodiac_sign};
pub use stats::LifeStats;
