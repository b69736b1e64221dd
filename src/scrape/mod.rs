// src/scrape/mod.rs
mod scrape;

pub use scrape::run;
pub use scrape::collect_participants;
pub use scrape::fetch_participant;
