//! Errors from parsing and calendar arithmetic.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    #[error("Date must be in YYYY-MM-DD or YYYY/MM/DD format (got {input:?})")]
    Format { input: String },

    #[error("{year:04}-{month:02}-{day:02} is not a real calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Birthdate {birth} is in the future (reference is {now})")]
    FutureDate {
        birth: NaiveDateTime,
        now: NaiveDateTime,
    },

    #[error("Date arithmetic went outside the supported calendar range")]
    OutOfRange,
}

impl AgeError {
    /// Errors caused by what the user typed; the caller should ask again.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AgeError::Format { .. } | AgeError::InvalidDate { .. } | AgeError::FutureDate { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AgeError>;
