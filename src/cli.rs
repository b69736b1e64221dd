// src/cli.rs
use std::io::{self, Write};
use std::process::ExitCode;

use color_eyre::eyre::{self, WrapErr};
use log::{error, info};
use thiserror::Error;

use crate::config::options::RunOptions;
use crate::core::net::{Fetch, HttpClient};
use crate::progress::Progress;
use crate::{report, scrape};

const USAGE: &str = "\
Usage: advent_power <calendar_name> <tag>

Ranks the participants of an advent calendar by the stocks of their posts
tagged <tag>, and prints the result as a markdown table.

Environment:
  ADVENT_CALENDAR_BASE   calendar host   (default https://qiita.com)
  ADVENT_API_BASE        API host        (default https://qiita.com)
  ADVENT_YEAR            calendar year   (default 2015)
  ADVENT_WORKERS         parallel fetches (default 4)
  ADVENT_TIMEOUT_SECS    per-request timeout (default 15)
  RUST_LOG               log filter      (default warn)";

const EXIT_USAGE: u8 = 2;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing argument <{0}>")]
    Missing(&'static str),
    #[error("unexpected argument: {0}")]
    Unexpected(String),
}

pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::with_capacity(2);
    for a in args {
        if a == "-h" || a == "--help" {
            return Ok(Command::Help);
        }
        if positional.len() == 2 {
            return Err(UsageError::Unexpected(a));
        }
        positional.push(a);
    }

    let mut it = positional.into_iter();
    let calendar = it.next().ok_or(UsageError::Missing("calendar_name"))?;
    let tag = it.next().ok_or(UsageError::Missing("tag"))?;
    Ok(Command::Run(RunOptions::new(calendar, tag)))
}

/// Entry point for the binary. Usage and config problems exit with 2; a
/// failed scrape prints the error line and exits with 1.
pub fn run<I>(args: I) -> eyre::Result<ExitCode>
where
    I: IntoIterator<Item = String>,
{
    let opts = match parse_args(args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            eprintln!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let opts = match opts.apply_env(|k| std::env::var(k).ok()) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = match HttpClient::new(&opts.net) {
        Ok(client) => execute(&client, &opts, &mut out),
        Err(e) => {
            error!("{e}");
            report::write_report(&mut out, &Err(e)).map(|_| false)
        }
    }
    .wrap_err("writing report to stdout")?;
    out.flush().wrap_err("flushing stdout")?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Scrape with `client` and write the report to `out`.
/// Returns whether the scrape succeeded.
pub fn execute<W: Write>(client: &dyn Fetch, opts: &RunOptions, out: &mut W) -> io::Result<bool> {
    let mut progress = LogProgress::default();
    let outcome = scrape::run(client, opts, Some(&mut progress));
    report::write_report(out, &outcome)?;
    Ok(outcome.is_ok())
}

#[derive(Default)]
struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn item_done(&mut self, _index: usize, user: &str) {
        self.done += 1;
        info!("[{}/{}] {user}", self.done, self.total);
    }

    fn finish(&mut self) {
        info!("Fetched {}/{} participants", self.done, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn two_positionals_make_a_run() {
        let cmd = parse_args(args(&["foo", "bar"])).unwrap();
        assert_eq!(cmd, Command::Run(RunOptions::new("foo", "bar")));
    }

    #[test]
    fn help_wins_anywhere() {
        assert_eq!(parse_args(args(&["foo", "--help"])).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn wrong_arity_is_a_usage_error() {
        assert_eq!(parse_args(args(&[])).unwrap_err(), UsageError::Missing("calendar_name"));
        assert_eq!(parse_args(args(&["foo"])).unwrap_err(), UsageError::Missing("tag"));
        assert_eq!(
            parse_args(args(&["foo", "bar", "baz"])).unwrap_err(),
            UsageError::Unexpected("baz".into())
        );
    }
}
