//! Dashboard configuration file.
//!
//! A small TOML file supplies defaults that command-line flags override:
//!
//! ```toml
//! data_path = "data/loud-noise-chapel-hill.json"
//! year_filter = 2023   # or "all"
//! top_n = 10
//! fill_range = true
//! ```

use std::path::{Path, PathBuf};

use noise_map_aggregate_models::YearFilter;
use serde::Deserialize;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "NOISE_MAP_CONFIG";

/// Default number of rows in the busiest-days table.
pub const DEFAULT_TOP_N: usize = 10;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Neither `--data` nor `data_path` says where the complaints are.
    #[error("no data file given: pass --data or set data_path in the config")]
    MissingDataPath,
}

/// Defaults for every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Complaint JSON document.
    pub data_path: Option<PathBuf>,
    /// Year filter for the matrix views.
    pub year_filter: YearFilter,
    /// Rows in the busiest-days table.
    pub top_n: usize,
    /// Whether `daily` zero-fills the range between the first and last date.
    pub fill_range: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            year_filter: YearFilter::All,
            top_n: DEFAULT_TOP_N,
            fill_range: false,
        }
    }
}

impl DashboardConfig {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Loads the explicit config path, else the one named by
    /// [`CONFIG_ENV_VAR`], else the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file cannot be read or parsed.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// The data file, preferring a command-line override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDataPath`] if neither is set.
    pub fn data_path<'a>(&'a self, cli_override: Option<&'a Path>) -> Result<&'a Path, ConfigError> {
        cli_override
            .or(self.data_path.as_deref())
            .ok_or(ConfigError::MissingDataPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(
            DashboardConfig::from_toml("").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn parses_full_document() {
        let config = DashboardConfig::from_toml(
            r#"
            data_path = "data/loud-noise-chapel-hill.json"
            year_filter = 2023
            top_n = 5
            fill_range = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.data_path.as_deref(),
            Some(Path::new("data/loud-noise-chapel-hill.json"))
        );
        assert_eq!(config.year_filter, YearFilter::Year(2023));
        assert_eq!(config.top_n, 5);
        assert!(config.fill_range);
    }

    #[test]
    fn accepts_all_keyword() {
        let config = DashboardConfig::from_toml(r#"year_filter = "all""#).unwrap();
        assert_eq!(config.year_filter, YearFilter::All);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_filters() {
        assert!(matches!(
            DashboardConfig::from_toml("colour = \"red\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml(r#"year_filter = "someday""#),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn cli_data_path_overrides_config() {
        let config = DashboardConfig {
            data_path: Some(PathBuf::from("from-config.json")),
            ..DashboardConfig::default()
        };

        assert_eq!(
            config.data_path(Some(Path::new("from-cli.json"))).unwrap(),
            Path::new("from-cli.json")
        );
        assert_eq!(
            config.data_path(None).unwrap(),
            Path::new("from-config.json")
        );
        assert!(matches!(
            DashboardConfig::default().data_path(None),
            Err(ConfigError::MissingDataPath)
        ));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = DashboardConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
