use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{BufRead, Write};

use crate::age::{
    Instant, birth_from_age, compute_breakdown, list_leap_years, parse_date, parse_instant,
};
use crate::error::AgeError;
use crate::facts::{DEFAULT_BPM, days_until, next_anniversary, zodiac_sign};
use crate::interactive::Session;
use crate::report;
use crate::stats::LifeStats;

#[derive(Debug, Clone, Parser)]
#[command(name = "agecalc", version)]
#[command(about = "Work out exactly how old someone is, and a few facts about it")]
pub struct Cli {
    #[arg(long, global = true, env = "AGECALC_NAME", default_value = "You")]
    pub name: String,

    /// Reference instant (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); defaults to the local clock
    #[arg(long, global = true, env = "AGECALC_NOW", value_parser = parse_instant)]
    pub now: Option<Instant>,

    #[arg(long, global = true, help = "Print JSON instead of text")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Exact age breakdown, totals and leap years
    Age {
        #[arg(value_parser = parse_date)]
        birthdate: Instant,

        #[arg(long)]
        no_leap_years: bool,
    },
    /// Estimate a birthdate from an age, then show the breakdown
    FromAge {
        #[arg(long)]
        years: u32,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=11))]
        months: u32,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=31))]
        days: u32,
    },
    /// Life analysis report
    Report {
        #[arg(value_parser = parse_date)]
        birthdate: Instant,

        #[arg(
            long,
            default_value_t = DEFAULT_BPM,
            value_parser = clap::value_parser!(u32).range(1..=300)
        )]
        bpm: u32,
    },
    /// Zodiac sign only
    Zodiac {
        #[arg(value_parser = parse_date)]
        birthdate: Instant,
    },
    /// Days until the next birthday
    NextBirthday {
        #[arg(value_parser = parse_date)]
        birthdate: Instant,
    },
    /// Menu-driven session on stdin/stdout
    Interactive,
}

impl Cli {
    pub fn reference_now(&self) -> Instant {
        self.now.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Process exit code for a failed run: 2 for rejected user input (same as
/// clap usage errors), 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let input_error = err
        .downcast_ref::<AgeError>()
        .is_some_and(AgeError::is_input_error);
    if input_error { 2 } else { 1 }
}

/// Runs one command against `now`, reading from `input` only in interactive mode.
pub fn run<R: BufRead, W: Write>(cli: &Cli, now: Instant, input: R, out: &mut W) -> Result<()> {
    let command = cli.command.clone().unwrap_or(Command::Interactive);
    tracing::info!(?command, %now, "dispatching");

    match command {
        Command::Age {
            birthdate,
            no_leap_years,
        } => print_age(cli, birthdate, now, !no_leap_years, out),
        Command::FromAge {
            years,
            months,
            days,
        } => {
            let birth = birth_from_age(now, years, months, days)
                .context("Failed to estimate a birthdate from the given age")?;
            tracing::debug!(%birth, "estimated birthdate");
            print_age(cli, birth, now, true, out)
        }
        Command::Report { birthdate, bpm } => {
            let stats = LifeStats::gather(birthdate.date(), now.date(), bpm)
                .context("Failed to build life report")?;
            if cli.json {
                let value = json!({ "name": cli.name, "stats": stats });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                write!(out, "{}", report::life_report(&cli.name, &stats))?;
            }
            Ok(())
        }
        Command::Zodiac { birthdate } => {
            let sign = zodiac_sign(birthdate);
            if cli.json {
                writeln!(out, "{}", json!({ "zodiac": sign }))?;
            } else {
                writeln!(out, "Your Zodiac Sign is: {sign}")?;
            }
            Ok(())
        }
        Command::NextBirthday { birthdate } => {
            let today = now.date();
            let next = next_anniversary(birthdate.date(), today)
                .context("Failed to compute the next birthday")?;
            let left = days_until(next, today);
            if cli.json {
                writeln!(out, "{}", json!({ "next_birthday": next, "days_left": left }))?;
            } else {
                writeln!(out, "Your next birthday is {next}, in {left} days!")?;
            }
            Ok(())
        }
        Command::Interactive => {
            let mut session = Session::new(input, out, now);
            session.run().context("Interactive session failed")
        }
    }
}

fn print_age<W: Write>(
    cli: &Cli,
    birth: Instant,
    now: Instant,
    show_leap_years: bool,
    out: &mut W,
) -> Result<()> {
    let age = compute_breakdown(birth, now).context("Failed to compute age")?;

    if cli.json {
        let leap_years = if show_leap_years {
            list_leap_years(birth.year(), now.year())
        } else {
            Vec::new()
        };
        let value = json!({
            "name": cli.name,
            "birth": birth,
            "now": now,
            "age": age,
            "leap_years": leap_years,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        write!(
            out,
            "{}",
            report::age_summary(&cli.name, &age, birth, now, show_leap_years)
        )?;
    }
    Ok(())
}
