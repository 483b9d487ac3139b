//! Configuration loader with file resolution and environment overrides.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "SMS_GATEWAY";

/// Environment variable for an explicit config path.
const CONFIG_PATH_ENV: &str = "SMS_GATEWAY_CONFIG";

/// Well-known config file locations, tried in order.
const WELL_KNOWN_PATHS: &[&str] = &["/etc/config/sms-gateway.json", "sms-gateway.json"];

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any).
    pub config_path: Option<PathBuf>,
    /// The loaded configuration.
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `SMS_GATEWAY_CONFIG` environment variable (explicit path)
    /// 2. `/etc/config/sms-gateway.json`
    /// 3. `./sms-gateway.json`
    /// 4. Built-in defaults (no file required)
    ///
    /// An explicit path must parse; a well-known file that exists but
    /// fails to parse is skipped with a warning and resolution
    /// continues, so startup never fails for lack of usable config.
    /// Environment variables override file values either way.
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_explicit(None)
    }

    /// Load configuration, preferring an explicit path (e.g. from a CLI
    /// flag) over the standard resolution order.
    pub fn load_with_explicit(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load_from(PathBuf::from(path));
        }

        for candidate in WELL_KNOWN_PATHS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match load_from_file(path) {
                Ok(mut config) => {
                    info!("Loaded config from {}", path.display());
                    apply_env_overrides(&mut config)?;
                    return Ok(Self {
                        config_path: Some(path.to_path_buf()),
                        config,
                    });
                }
                Err(e) => {
                    warn!("Error parsing config file {}: {}", path.display(), e);
                }
            }
        }

        info!("Config file not found, using defaults");
        let mut config = Config::default();
        apply_env_overrides(&mut config)?;
        Ok(Self {
            config_path: None,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file), still
    /// applying env overrides.
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        let _ = apply_env_overrides(&mut config);

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(ConfigError::ParseError)
}

/// Apply environment variable overrides to the configuration.
///
/// Variables follow the pattern `SMS_GATEWAY_<KEY>`:
/// - `SMS_GATEWAY_SERIAL_PORT=/dev/ttyUSB2`
/// - `SMS_GATEWAY_HTTP_PORT=8080`
/// - `SMS_GATEWAY_BAUD_RATE=9600`
/// - `SMS_GATEWAY_LOG_LEVEL=debug`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SERIAL_PORT")) {
        config.serial_port = val;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_HTTP_PORT")) {
        config.http_port = val.parse().map_err(|_| {
            ConfigError::env_parse(format!("{ENV_PREFIX}_HTTP_PORT"), "Invalid port number")
        })?;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_BAUD_RATE")) {
        config.baud_rate = val.parse().map_err(|_| {
            ConfigError::env_parse(format!("{ENV_PREFIX}_BAUD_RATE"), "Invalid baud rate")
        })?;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_LOG_LEVEL")) {
        config.log_level = val;
    }

    Ok(())
}
