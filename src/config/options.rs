// src/config/options.rs
use std::time::Duration;

use thiserror::Error;

use super::consts::*;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Everything one run needs to know: what to scrape, and where from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub calendar: String,
    pub tag: String,
    pub net: NetOptions,
    pub workers: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub calendar_base: String,
    pub api_base: String,
    pub year: u16,
    pub per_page: u32,
    pub timeout: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            calendar_base: CALENDAR_BASE.to_string(),
            api_base: API_BASE.to_string(),
            year: CALENDAR_YEAR,
            per_page: PER_PAGE,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RunOptions {
    pub fn new(calendar: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            calendar: calendar.into(),
            tag: tag.into(),
            net: NetOptions::default(),
            workers: WORKERS,
        }
    }

    /// Apply `ADVENT_*` overrides. `lookup` is `std::env::var(..).ok()` in the
    /// binary; tests pass a closure over a fixed table.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CALENDAR_BASE) {
            self.net.calendar_base = v;
        }
        if let Some(v) = lookup(ENV_API_BASE) {
            self.net.api_base = v;
        }
        if let Some(v) = lookup(ENV_YEAR) {
            self.net.year = parse_var(ENV_YEAR, &v)?;
        }
        if let Some(v) = lookup(ENV_WORKERS) {
            let n: usize = parse_var(ENV_WORKERS, &v)?;
            if n == 0 {
                return Err(ConfigError { var: ENV_WORKERS, value: v });
            }
            self.workers = n;
        }
        if let Some(v) = lookup(ENV_TIMEOUT) {
            // A zero timeout would fail every request before it is sent.
            let secs: u64 = parse_var(ENV_TIMEOUT, &v)?;
            if secs == 0 {
                return Err(ConfigError { var: ENV_TIMEOUT, value: v });
            }
            self.net.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }
}

impl NetOptions {
    pub fn calendar_url(&self, calendar: &str) -> String {
        format!(
            "{}/advent-calendar/{}/{}",
            self.calendar_base.trim_end_matches('/'),
            self.year,
            calendar
        )
    }

    pub fn items_url(&self, user: &str) -> String {
        format!(
            "{}/api/v1/users/{}/items?per_page={}",
            self.api_base.trim_end_matches('/'),
            user,
            self.per_page
        )
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError { var, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn default_urls_point_at_qiita_2015() {
        let opts = RunOptions::new("swift", "Swift");
        assert_eq!(
            opts.net.calendar_url(&opts.calendar),
            "https://qiita.com/advent-calendar/2015/swift"
        );
        assert_eq!(
            opts.net.items_url("alice"),
            "https://qiita.com/api/v1/users/alice/items?per_page=100"
        );
    }

    #[test]
    fn env_overrides_hosts_and_numbers() {
        let opts = RunOptions::new("foo", "bar")
            .apply_env(env(&[
                (ENV_CALENDAR_BASE, "http://127.0.0.1:8080/"),
                (ENV_API_BASE, "http://127.0.0.1:9090"),
                (ENV_YEAR, "2016"),
                (ENV_WORKERS, "8"),
                (ENV_TIMEOUT, "3"),
            ]))
            .unwrap();
        assert_eq!(opts.net.calendar_url("foo"), "http://127.0.0.1:8080/advent-calendar/2016/foo");
        assert_eq!(opts.net.items_url("bob"), "http://127.0.0.1:9090/api/v1/users/bob/items?per_page=100");
        assert_eq!(opts.workers, 8);
        assert_eq!(opts.net.timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = RunOptions::new("foo", "bar")
            .apply_env(env(&[(ENV_YEAR, "twenty")]))
            .unwrap_err();
        assert_eq!(err.var, ENV_YEAR);

        let err = RunOptions::new("foo", "bar")
            .apply_env(env(&[(ENV_WORKERS, "0")]))
            .unwrap_err();
        assert_eq!(err.var, ENV_WORKERS);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = RunOptions::new("foo", "bar")
            .apply_env(env(&[(ENV_TIMEOUT, "0")]))
            .unwrap_err();
        assert_eq!(err.var, ENV_TIMEOUT);
        assert_eq!(err.value, "0");
    }
}
