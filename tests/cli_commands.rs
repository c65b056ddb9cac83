use agecalc::AgeError;
use agecalc::cli::{self, Cli};
use assert_matches::assert_matches;
use clap::Parser;
use clap::error::ErrorKind;
use serde_json::Value;

fn run_args(args: &[&str], input: &str) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args).unwrap();
    let now = cli.reference_now();
    let mut out = Vec::new();
    cli::run(&cli, now, input.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn age_summary_for_leap_day_birth() {
    let out = run_args(
        &["agecalc", "--now", "2021-03-01", "--name", "Ada", "age", "2000-02-29"],
        "",
    )
    .unwrap();

    assert!(out.contains("Hello, Ada!"));
    assert!(out.contains("Age: 21 years, 0 months, 1 day, 0 hours, 0 minutes, 0 seconds"));
    assert!(out.contains("(6): 2000, 2004, 2008, 2012, 2016, 2020"));
}

#[test]
fn age_as_json() {
    let out = run_args(
        &["agecalc", "--now", "2020-05-15T06:30:00", "--json", "age", "1990/05/15"],
        "",
    )
    .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["name"], "You");
    assert_eq!(v["age"]["years"], 30);
    assert_eq!(v["age"]["months"], 0);
    assert_eq!(v["age"]["hours"], 6);
    assert_eq!(v["age"]["minutes"], 30);
    assert_eq!(v["age"]["total_days"], 10958);
    assert_eq!(v["leap_years"].as_array().unwrap().len(), 8);
}

#[test]
fn no_leap_years_flag_hides_listing() {
    let out = run_args(
        &["agecalc", "--now", "2021-03-01", "age", "2000-02-29", "--no-leap-years"],
        "",
    )
    .unwrap();
    assert!(!out.contains("Leap years"));
}

#[test]
fn from_age_estimates_birth() {
    let out = run_args(
        &["agecalc", "--now", "2024-06-01", "from-age", "--years", "30", "--days", "5"],
        "",
    )
    .unwrap();
    assert!(out.contains("Age: 30 years, 0 months, 5 days"));
}

#[test]
fn report_as_json() {
    let out = run_args(
        &["agecalc", "--now", "2021-03-01", "--json", "report", "2000-02-29", "--bpm", "60"],
        "",
    )
    .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    let stats = &v["stats"];

    assert_eq!(stats["zodiac"], "Pisces");
    assert_eq!(stats["years"], 21);
    assert_eq!(stats["next_birthday"], "2022-02-28");
    assert_eq!(stats["days_until_birthday"], 364);
    assert_eq!(stats["total_days"], 7671);
    assert_eq!(stats["heartbeats"], 7671 * 1440 * 60);
    assert_eq!(stats["milestones"].as_array().unwrap().len(), 2);
}

#[test]
fn zodiac_and_next_birthday() {
    let out = run_args(&["agecalc", "--now", "2024-01-01", "zodiac", "1999-12-22"], "").unwrap();
    assert_eq!(out.trim(), "Your Zodiac Sign is: Capricorn");

    let out = run_args(
        &["agecalc", "--now", "2021-03-01", "next-birthday", "2000-02-29"],
        "",
    )
    .unwrap();
    assert_eq!(out.trim(), "Your next birthday is 2022-02-28, in 364 days!");
}

#[test]
fn future_birthdate_is_an_input_error() {
    let err = run_args(&["agecalc", "--now", "2020-01-01", "age", "2020-01-02"], "").unwrap_err();
    let age_err = err.downcast_ref::<AgeError>().unwrap();
    assert_matches!(age_err, AgeError::FutureDate { .. });
    assert!(age_err.is_input_error());
}

#[test]
fn bad_arguments_are_rejected_by_clap() {
    let err = Cli::try_parse_from(["agecalc", "age", "2024-02-30"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = Cli::try_parse_from(["agecalc", "age", "abcd"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = Cli::try_parse_from(["agecalc", "from-age", "--years", "3", "--months", "12"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn no_subcommand_starts_interactive_session() {
    let out = run_args(&["agecalc", "--now", "2024-01-01"], "Ada\n6\n").unwrap();
    assert!(out.contains("Welcome to the interactive Age Calculator!"));
    assert!(out.contains("Goodbye!"));
}

#[test]
fn extreme_bpm_is_rejected_by_clap() {
    let err = Cli::try_parse_from([
        "agecalc", "--now", "9999-12-31", "report", "0000-01-01", "--bpm", "4000000000",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = Cli::try_parse_from(["agecalc", "report", "2000-01-01", "--bpm", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn widest_date_span_at_max_bpm_reports() {
    let out = run_args(
        &["agecalc", "--now", "9999-12-31", "--json", "report", "0000-01-01", "--bpm", "300"],
        "",
    )
    .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    let days = v["stats"]["total_days"].as_i64().unwrap();
    assert_eq!(v["stats"]["heartbeats"].as_i64().unwrap(), days * 1440 * 300);
}

#[test]
fn huge_age_is_out_of_range_not_input_error() {
    let err = run_args(
        &["agecalc", "--now", "2024-01-01", "from-age", "--years", "4294967295"],
        "",
    )
    .unwrap_err();
    let age_err = err.downcast_ref::<AgeError>().unwrap();
    assert_matches!(age_err, AgeError::OutOfRange);
    assert!(!age_err.is_input_error());
    assert_eq!(cli::exit_code(&err), 1);
}

#[test]
fn future_birthdate_exits_with_usage_code() {
    let err = run_args(&["agecalc", "--now", "2020-01-01", "age", "2021-01-01"], "").unwrap_err();
    assert_eq!(cli::exit_code(&err), 2);
}
