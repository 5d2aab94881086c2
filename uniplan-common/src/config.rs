//! Bootstrap configuration loading and resolution
//!
//! Two-tier configuration:
//! 1. **TOML Bootstrap**: database path, port, remote source URLs, logging.
//!    Static for the lifetime of the process.
//! 2. **Resolution priority**: command-line arguments, then `UNIPLAN_*`
//!    environment variables, then the TOML file, then built-in defaults.
//!
//! A missing or unreadable TOML file never aborts startup; the module logs a
//! warning and continues with defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default HTTP port for the uniplan-ui module
pub const DEFAULT_PORT: u16 = 5730;

/// Default static catalog snapshot URL
pub const DEFAULT_CATALOG_URL: &str =
    "https://my-tcas.s3.ap-southeast-1.amazonaws.com/mytcas/courses.json";

/// Default object-store base URL for program detail and round payloads
pub const DEFAULT_ASSET_BASE_URL: &str =
    "https://my-tcas.s3.ap-southeast-1.amazonaws.com/mytcas";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime. The application must restart
/// to pick up changes to the TOML file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Path to SQLite database file (relative or absolute)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// URL of the static program catalog snapshot
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// Base URL of the object store serving detail/round payloads
    #[serde(default)]
    pub asset_base_url: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load bootstrap configuration from a TOML file
    ///
    /// Returns defaults when `path` is None or the file does not exist.
    /// A file that exists but does not parse is a hard configuration error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Command-line overrides carried into resolution (highest priority)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub catalog_url: Option<String>,
    pub asset_base_url: Option<String>,
}

/// Fully resolved module configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub database_path: PathBuf,
    pub port: u16,
    pub catalog_url: String,
    pub asset_base_url: String,
    pub log_level: String,
}

impl ResolvedConfig {
    /// Resolve configuration following the priority order:
    /// 1. Command-line argument
    /// 2. Environment variable (`UNIPLAN_DATABASE`, `UNIPLAN_PORT`,
    ///    `UNIPLAN_CATALOG_URL`, `UNIPLAN_ASSET_BASE_URL`)
    /// 3. TOML config file
    /// 4. Built-in default
    pub fn resolve(cli: Overrides, config_path: Option<&Path>) -> Result<Self> {
        let file = TomlConfig::load(config_path)?;

        let database_path = cli
            .database_path
            .or_else(|| std::env::var("UNIPLAN_DATABASE").ok().map(PathBuf::from))
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from("uniplan.db"));

        let port = cli
            .port
            .or_else(|| match std::env::var("UNIPLAN_PORT") {
                Ok(raw) => match raw.parse::<u16>() {
                    Ok(p) => Some(p),
                    Err(_) => {
                        warn!("Ignoring invalid UNIPLAN_PORT value: {}", raw);
                        None
                    }
                },
                Err(_) => None,
            })
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let catalog_url = cli
            .catalog_url
            .or_else(|| std::env::var("UNIPLAN_CATALOG_URL").ok())
            .or(file.catalog_url)
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let asset_base_url = cli
            .asset_base_url
            .or_else(|| std::env::var("UNIPLAN_ASSET_BASE_URL").ok())
            .or(file.asset_base_url)
            .unwrap_or_else(|| DEFAULT_ASSET_BASE_URL.to_string());

        Ok(Self {
            database_path,
            port,
            catalog_url,
            asset_base_url,
            log_level: file.logging.level,
        })
    }
}
