// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod progress;
pub mod report;
pub mod scrape;
pub mod specs;

pub use error::{Result, ScrapeError};
