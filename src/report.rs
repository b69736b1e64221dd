// src/report.rs
//! Markdown leaderboard.
//!
//! ```text
//! | 担当日 | ユーザー | 総ストック数 | 投稿数 | 平均ストック数 |
//! |:---|:--:|---:|---:|---:|
//! | 12/1 | @alice | 3 | 1 | 3.0 |
//! | 戦力 | | | | 3.0 |
//! ```
//!
//! Rows are zipped with calendar days 1..=25; participants past day 25 get no
//! row but still count towards the total.

use std::io::{self, Write};

use crate::config::consts::{CALENDAR_DAYS, CALENDAR_MONTH, ERROR_LINE};
use crate::error::Result;
use crate::model::Participant;

const HEADER: &str = "| 担当日 | ユーザー | 総ストック数 | 投稿数 | 平均ストック数 |";
const ALIGN: &str = "|:---|:--:|---:|---:|---:|";

/// Table for a successful run, the single error line otherwise.
pub fn write_report<W: Write>(w: &mut W, outcome: &Result<Vec<Participant>>) -> io::Result<()> {
    match outcome {
        Ok(participants) => write_table(w, participants),
        Err(_) => writeln!(w, "{ERROR_LINE}"),
    }
}

pub fn write_table<W: Write>(w: &mut W, participants: &[Participant]) -> io::Result<()> {
    writeln!(w, "{HEADER}")?;
    writeln!(w, "{ALIGN}")?;

    for (day, p) in (1..=CALENDAR_DAYS).zip(participants) {
        writeln!(
            w,
            "| {CALENDAR_MONTH}/{day} | @{} | {} | {} | {} |",
            p.id,
            p.stock_count(),
            p.post_count(),
            fmt_score(p.score())
        )?;
    }

    writeln!(w, "| 戦力 | | | | {} |", fmt_score(total_score(participants)))
}

/// Starts from `0.0`: float `sum()` of nothing is `-0.0`.
pub fn total_score(participants: &[Participant]) -> f32 {
    participants.iter().fold(0.0, |acc, p| acc + p.score())
}

const SIG_DIGITS: usize = 6;

/// `%g` with 6 significant digits, plus `.0` when the fixed form has no
/// fraction: `3.0`, `2.5`, `2.33333`, `1.23457e+06`.
pub fn fmt_score(v: f32) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let v = f64::from(v);
    if v == 0.0 {
        return "0.0".to_string();
    }

    // Round to 6 significant digits first; the rounded exponent picks the form.
    let sci = format!("{:.*e}", SIG_DIGITS - 1, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIG_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs());
    }

    let decimals = (SIG_DIGITS as i32 - 1 - exp).max(0) as usize;
    let fixed = format!("{v:.decimals$}");
    let fixed = trim_fraction(&fixed);
    if fixed.contains('.') { fixed.to_string() } else { format!("{fixed}.0") }
}

/// `2.50000` → `2.5`, `3.000` → `3`.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

pub fn render(outcome: &Result<Vec<Participant>>) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, outcome);
    String::from_utf8_lossy(&buf).into_owned()
}
