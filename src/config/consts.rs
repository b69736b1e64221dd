// src/config/consts.rs

// Net config
pub const CALENDAR_BASE: &str = "https://qiita.com";
pub const API_BASE: &str = "https://qiita.com";
pub const CALENDAR_YEAR: u16 = 2015;
pub const PER_PAGE: u32 = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("advent_power/", env!("CARGO_PKG_VERSION"));

// Calendar page
pub const DAY_CLASS: &str = "adventCalendarCalendar_day";
pub const AUTHOR_CLASS: &str = "adventCalendarCalendar_author";

// Report
pub const CALENDAR_DAYS: usize = 25;
pub const CALENDAR_MONTH: u8 = 12;
pub const ERROR_LINE: &str = "エラーが発生しました。";

// Concurrency
pub const WORKERS: usize = 4;

// Environment overrides
pub const ENV_CALENDAR_BASE: &str = "ADVENT_CALENDAR_BASE";
pub const ENV_API_BASE: &str = "ADVENT_API_BASE";
pub const ENV_YEAR: &str = "ADVENT_YEAR";
pub const ENV_WORKERS: &str = "ADVENT_WORKERS";
pub const ENV_TIMEOUT: &str = "ADVENT_TIMEOUT_SECS";
