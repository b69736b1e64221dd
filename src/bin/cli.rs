// src/bin/cli.rs
use std::process::ExitCode;

use advent_power::cli;
use env_logger::Env;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    cli::run(std::env::args().skip(1))
}
