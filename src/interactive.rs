//! Menu-driven session. Every prompt re-asks until the answer is usable;
//! end of input ends the session quietly.

use std::io::{self, BufRead, Write};

use crate::age::{Instant, birth_from_age, compute_breakdown, parse_date};
use crate::error::AgeError;
use crate::facts::{DEFAULT_BPM, days_until, next_anniversary, zodiac_sign};
use crate::report;
use crate::stats::LifeStats;

const MENU: &str = "\nWhat would you like to do?
  1) Age breakdown from my birthdate (YYYY-MM-DD)
  2) Age breakdown from my age in years/months/days
  3) Full life report
  4) Zodiac sign only
  5) Days until my next birthday
  6) Quit";

pub struct Session<R, W> {
    input: R,
    out: W,
    now: Instant,
    bpm: u32,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, now: Instant) -> Self {
        Self {
            input,
            out,
            now,
            bpm: DEFAULT_BPM,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Welcome to the interactive Age Calculator!")?;

        loop {
            let Some(name) =
                self.prompt("\nPlease enter your name (or press Enter to use 'You'): ")?
            else {
                return Ok(());
            };
            let name = if name.is_empty() { "You".to_string() } else { name };

            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Choose 1-6: ")? else {
                return Ok(());
            };

            let finished = match choice.as_str() {
                "1" => self.birthdate_summary(&name)?,
                "2" => self.age_summary(&name)?,
                "3" => self.life_report(&name)?,
                "4" => self.zodiac()?,
                "5" => self.next_birthday()?,
                "6" => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.out, "Please choose a valid option (1-6).")?;
                    true
                }
            };
            if !finished {
                return Ok(());
            }

            let again = self
                .prompt("Would you like to do another calculation? (y/N): ")?
                .unwrap_or_default();
            if !again.eq_ignore_ascii_case("y") {
                writeln!(self.out, "Thanks for using the Age Calculator!")?;
                return Ok(());
            }
        }
    }

    // Each action returns Ok(false) when input ran out mid-way.

    fn birthdate_summary(&mut self, name: &str) -> io::Result<bool> {
        let Some(birth) = self.prompt_birthdate()? else {
            return Ok(false);
        };
        self.show_summary(name, birth)?;
        Ok(true)
    }

    fn age_summary(&mut self, name: &str) -> io::Result<bool> {
        let Some(years) = self.prompt_int("Enter full years (e.g. 34): ", 0, None, false)? else {
            return Ok(false);
        };
        let Some(months) =
            self.prompt_int("Enter extra months (0-11, press Enter for 0): ", 0, Some(11), true)?
        else {
            return Ok(false);
        };
        let Some(days) =
            self.prompt_int("Enter extra days (0-31, press Enter for 0): ", 0, Some(31), true)?
        else {
            return Ok(false);
        };

        match birth_from_age(self.now, years, months, days) {
            Ok(birth) => self.show_summary(name, birth)?,
            Err(e) => writeln!(self.out, "Cannot work out a birthdate: {e}")?,
        }
        Ok(true)
    }

    fn life_report(&mut self, name: &str) -> io::Result<bool> {
        let Some(birth) = self.prompt_birthdate()? else {
            return Ok(false);
        };
        match LifeStats::gather(birth.date(), self.now.date(), self.bpm) {
            Ok(stats) => write!(self.out, "\n{}", report::life_report(name, &stats))?,
            Err(e) => writeln!(self.out, "Cannot build the report: {e}")?,
        }
        Ok(true)
    }

    fn zodiac(&mut self) -> io::Result<bool> {
        let Some(birth) = self.prompt_birthdate()? else {
            return Ok(false);
        };
        writeln!(self.out, "\nYour Zodiac Sign is: {}", zodiac_sign(birth))?;
        Ok(true)
    }

    fn next_birthday(&mut self) -> io::Result<bool> {
        let Some(birth) = self.prompt_birthdate()? else {
            return Ok(false);
        };
        let today = self.now.date();
        match next_anniversary(birth.date(), today) {
            Ok(next) => writeln!(
                self.out,
                "\nYour next birthday is in {} days!",
                days_until(next, today)
            )?,
            Err(e) => writeln!(self.out, "Cannot work out the next birthday: {e}")?,
        }
        Ok(true)
    }

    fn show_summary(&mut self, name: &str, birth: Instant) -> io::Result<()> {
        match compute_breakdown(birth, self.now) {
            Ok(age) => write!(
                self.out,
                "\n{}",
                report::age_summary(name, &age, birth, self.now, true)
            ),
            Err(e) => writeln!(self.out, "Cannot compute age: {e}"),
        }
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_birthdate(&mut self) -> io::Result<Option<Instant>> {
        loop {
            let Some(text) = self.prompt("Enter birthdate (YYYY-MM-DD): ")? else {
                return Ok(None);
            };
            let parsed = parse_date(&text).and_then(|birth| {
                if birth > self.now {
                    Err(AgeError::FutureDate {
                        birth,
                        now: self.now,
                    })
                } else {
                    Ok(birth)
                }
            });
            match parsed {
                Ok(birth) => return Ok(Some(birth)),
                Err(e) => {
                    tracing::debug!(input = %text, error = %e, "rejected birthdate");
                    writeln!(self.out, "Invalid date: {e}")?;
                }
            }
        }
    }

    fn prompt_int(
        &mut self,
        text: &str,
        min: u32,
        max: Option<u32>,
        allow_empty: bool,
    ) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            if allow_empty && answer.is_empty() {
                return Ok(Some(0));
            }
            let Ok(n) = answer.parse::<i64>() else {
                writeln!(self.out, "Please enter a valid integer.")?;
                continue;
            };
            if n < i64::from(min) {
                writeln!(self.out, "Please enter a value >= {min}")?;
                continue;
            }
            if let Some(max) = max.filter(|&max| n > i64::from(max)) {
                writeln!(self.out, "Please enter a value <= {max}")?;
                continue;
            }
            match u32::try_from(n) {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.out, "Please enter a value <= {}", u32::MAX)?,
            }
        }
    }
}
