//! Runtime configuration from environment variables.
//!
//! `PORT` (default 8080), `ORDERS_PATH` (default `data/orders.json`), `STORE_PATH`
//! (default `data/local_storage.json`), `COUNTRIES_URL` (default restcountries.com),
//! `WATERMARK_PATH` (optional; no watermark when unset).

use crate::onboarding::DEFAULT_COUNTRIES_URL;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub orders_path: PathBuf,
    pub store_path: PathBuf,
    pub countries_url: String,
    pub watermark_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            orders_path: PathBuf::from("data/orders.json"),
            store_path: PathBuf::from("data/local_storage.json"),
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            watermark_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable or empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            port: get("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            orders_path: get("ORDERS_PATH").map(PathBuf::from).unwrap_or(defaults.orders_path),
            store_path: get("STORE_PATH").map(PathBuf::from).unwrap_or(defaults.store_path),
            countries_url: get("COUNTRIES_URL").unwrap_or(defaults.countries_url),
            watermark_path: get("WATERMARK_PATH").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn values_override_defaults() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9090"),
            ("ORDERS_PATH", "/srv/orders.json"),
            ("WATERMARK_PATH", "/srv/wm.png"),
            ("STORE_PATH", " "),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 9090);
        assert_eq!(config.orders_path, PathBuf::from("/srv/orders.json"));
        assert_eq!(config.watermark_path, Some(PathBuf::from("/srv/wm.png")));
        assert_eq!(config.store_path, PathBuf::from("data/local_storage.json"));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = AppConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }
}
