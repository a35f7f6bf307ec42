// src/clock.rs

use chrono::{DateTime, Utc};

/// Format SQLite's date functions accept for a bound "now".
pub const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_sqlite(&self) -> String {
        self.now().format(SQLITE_DATETIME).to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    /// `at("2024-01-11 00:00:00")`
    pub fn at(s: &str) -> Self {
        let naive = chrono::NaiveDateTime::parse_from_str(s, SQLITE_DATETIME).unwrap();
        Self(naive.and_utc())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
