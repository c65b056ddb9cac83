use chrono::Datelike;

use crate::age::{AgeBreakdown, Instant, list_leap_years, unit};
use crate::stats::LifeStats;

const RULE_WIDTH: usize = 40;
const REPORT_WIDTH: usize = 60;
const STAT_ALIGN_WIDTH: usize = 48;

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> String {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    format!("{key_part}{dots}{value}")
}

pub fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

/// Thousands separators, e.g. 1234567 -> "1,234,567".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 { format!("-{out}") } else { out }
}

pub fn age_summary(
    name: &str,
    age: &AgeBreakdown,
    birth: Instant,
    now: Instant,
    show_leap_years: bool,
) -> String {
    let mut lines = vec![
        "=".repeat(RULE_WIDTH),
        format!(
            "Hello, {name}! Here's a detailed breakdown of your age (as of {}):",
            now.format("%Y-%m-%d %H:%M:%S")
        ),
        "-".repeat(RULE_WIDTH),
        format!("Age: {}", age.describe()),
        format!(
            "Total: {} ({} seconds)",
            unit(age.total_days, "day"),
            age.total_seconds
        ),
    ];

    if show_leap_years {
        let leaps = list_leap_years(birth.year(), now.year());
        let listed = if leaps.is_empty() {
            "None".to_string()
        } else {
            leaps
                .iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push("-".repeat(RULE_WIDTH));
        lines.push(format!(
            "Leap years between {} and {} ({}): {listed}",
            birth.year(),
            now.year(),
            leaps.len()
        ));
    }

    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n") + "\n"
}

pub fn life_report(name: &str, stats: &LifeStats) -> String {
    let rows = [
        ("Birthday", stats.birthday.to_string()),
        ("Age in Years", stats.years.to_string()),
        ("Age in Months", stats.months_total.to_string()),
        ("Age in Days", stats.total_days.to_string()),
        ("Zodiac Sign", stats.zodiac.to_string()),
        (
            "Next Birthday",
            format!(
                "{} ({} left)",
                stats.next_birthday,
                unit(stats.days_until_birthday, "day")
            ),
        ),
        ("Estimated Heartbeats", group_thousands(stats.heartbeats)),
    ];

    let mut lines = vec![
        "=".repeat(REPORT_WIDTH),
        format!("LIFE ANALYSIS REPORT FOR: {}", name.to_uppercase()),
        "=".repeat(REPORT_WIDTH),
    ];
    lines.extend(
        rows.iter()
            .map(|(key, value)| build_stat_row(key, value, STAT_ALIGN_WIDTH)),
    );
    lines.push(String::new());
    lines.push(build_header_line("LIFE MILESTONES", STAT_ALIGN_WIDTH));

    if stats.milestones.is_empty() {
        lines.push(" - Just getting started!".to_string());
    } else {
        lines.extend(stats.milestones.iter().map(|m| format!(" - {m}")));
    }

    lines.join("\n") + "\n"
}
