use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{
    criteria::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE},
    CriteriaNormalizer, RankingEngine, ViewportFitter, ZoomLevels,
};
use crate::models::Coordinates;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub reports: ReportsSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where candidate reports are read from
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsSettings {
    #[serde(default = "default_reports_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_reports_timeout")]
    pub timeout_secs: u64,
}

impl Default for ReportsSettings {
    fn default() -> Self {
        Self {
            endpoint: default_reports_endpoint(),
            api_key: None,
            timeout_secs: default_reports_timeout(),
        }
    }
}

fn default_reports_endpoint() -> String { "http://localhost:3000/api".to_string() }
fn default_reports_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: default_snapshot_ttl(),
        }
    }
}

fn default_snapshot_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
    #[serde(default = "default_neutral_zoom")]
    pub neutral_zoom: u8,
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            neutral_zoom: default_neutral_zoom(),
            focus_zoom: default_focus_zoom(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_fallback_latitude() -> f64 { FALLBACK_LATITUDE }
fn default_fallback_longitude() -> f64 { FALLBACK_LONGITUDE }
fn default_neutral_zoom() -> u8 { 12 }
fn default_focus_zoom() -> u8 { 15 }
fn default_max_limit() -> u16 { 500 }

impl SearchSettings {
    /// Fallback searcher location. An invalid configured point is replaced by the
    /// built-in default.
    pub fn fallback(&self) -> Coordinates {
        let point = Coordinates::new(self.fallback_latitude, self.fallback_longitude);
        if point.is_valid() {
            point
        } else {
            tracing::warn!(
                "Configured fallback location ({}, {}) is invalid, using default",
                self.fallback_latitude,
                self.fallback_longitude
            );
            crate::core::fallback_origin()
        }
    }

    pub fn zoom_levels(&self) -> ZoomLevels {
        ZoomLevels {
            neutral: self.neutral_zoom,
            focus: self.focus_zoom,
        }
    }

    /// Build the ranking engine these settings describe
    pub fn engine(&self) -> RankingEngine {
        let fallback = self.fallback();
        RankingEngine::new(
            CriteriaNormalizer::new(fallback),
            ViewportFitter::new(fallback, self.zoom_levels()),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STRAY__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STRAY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STRAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STRAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Apply the unprefixed deployment variables the reports API is usually configured with
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let reports_endpoint = env::var("REPORTS_API_URL").ok();
    let reports_api_key = env::var("REPORTS_API_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = reports_endpoint {
        builder = builder.set_override("reports.endpoint", endpoint)?;
    }
    if let Some(api_key) = reports_api_key {
        builder = builder.set_override("reports.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.cache.snapshot_ttl_secs, 300);
        assert_eq!(settings.search.fallback(), Coordinates::new(13.7563, 100.5018));
        assert_eq!(settings.search.zoom_levels(), ZoomLevels { neutral: 12, focus: 15 });
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_toml_str(
            r#"
            [reports]
            endpoint = "https://reports.example.org/api"
            api_key = "abc"

            [search]
            fallback_latitude = 18.7883
            fallback_longitude = 98.9853
            focus_zoom = 17
            "#,
        )
        .unwrap();

        assert_eq!(settings.reports.endpoint, "https://reports.example.org/api");
        assert_eq!(settings.reports.api_key.as_deref(), Some("abc"));
        assert_eq!(settings.reports.timeout_secs, 10);
        assert_eq!(settings.search.fallback(), Coordinates::new(18.7883, 98.9853));
        assert_eq!(settings.search.zoom_levels().focus, 17);
        assert_eq!(settings.search.zoom_levels().neutral, 12);
    }

    #[test]
    fn test_invalid_fallback_replaced() {
        let mut search = SearchSettings::default();
        search.fallback_latitude = 120.0;
        assert_eq!(search.fallback(), crate::core::fallback_origin());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
