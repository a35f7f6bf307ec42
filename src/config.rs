// src/config.rs

use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:ecom.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads the process environment; anything missing or unparsable gets its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let host = lookup("HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());
        let port = lookup("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { database_url, host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.database_url, "sqlite:ecom.db");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = config_from(&[
            ("DATABASE_URL", "sqlite:/var/lib/shop/ecom.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
        ]);
        assert_eq!(cfg.database_url, "sqlite:/var/lib/shop/ecom.db");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let cfg = config_from(&[("PORT", "eighty")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
