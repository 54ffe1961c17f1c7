//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub restcountries: RestCountriesConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_source: Option<String>,
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RestCountriesConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Stop the local-time clock after this many ticks. Absent = never stop.
    pub max_ticks: Option<u32>,
    pub interval_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SOURCE: &str = "restcountries";
pub const DEFAULT_RESTCOUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options except where absence means something)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: String,
    pub snapshot_path: Option<PathBuf>,
    pub restcountries_base_url: String,
    pub timeout_secs: u64,
    pub clock_max_ticks: Option<u32>,
    pub clock_interval_ms: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AtlasConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AtlasConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<AtlasConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Atlas Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_source = "restcountries"   # "restcountries" or "snapshot"
# snapshot_path = "countries.json"   # JSON array in the restcountries v3.1 shape

# [restcountries]
# base_url = "https://restcountries.com/v3.1"   # Or set RESTCOUNTRIES_BASE_URL
# timeout_secs = 15

# [clock]
# max_ticks = 1        # Stop the local-time clock after N ticks (omit to run forever)
# interval_ms = 1000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values that can come from the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub source: Option<&'a str>,
    pub snapshot_path: Option<&'a Path>,
    pub base_url: Option<&'a str>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AtlasConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Source: CLI → env → config → default
    let source = cli
        .source
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ATLAS_SOURCE").ok())
        .or_else(|| config.general.default_source.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    // Snapshot path: CLI → env → config
    let snapshot_path = cli
        .snapshot_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("ATLAS_SNAPSHOT_PATH").ok().map(PathBuf::from))
        .or_else(|| config.general.snapshot_path.as_ref().map(PathBuf::from));

    // Base URL: CLI → env → config → default
    let restcountries_base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("RESTCOUNTRIES_BASE_URL").ok())
        .or_else(|| config.restcountries.base_url.clone())
        .unwrap_or_else(|| DEFAULT_RESTCOUNTRIES_BASE_URL.to_string());

    ResolvedConfig {
        source,
        snapshot_path,
        restcountries_base_url: restcountries_base_url.trim_end_matches('/').to_string(),
        timeout_secs: config
            .restcountries
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        clock_max_ticks: config.clock.max_ticks,
        clock_interval_ms: config
            .clock
            .interval_ms
            .unwrap_or(DEFAULT_CLOCK_INTERVAL_MS)
            .max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = AtlasConfig::default();
        assert!(config.general.default_source.is_none());
        assert!(config.clock.max_ticks.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AtlasConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(resolved.clock_interval_ms, DEFAULT_CLOCK_INTERVAL_MS);
        assert_eq!(resolved.clock_max_ticks, None);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AtlasConfig {
            general: GeneralConfig {
                default_source: Some("snapshot".to_string()),
                snapshot_path: Some("/tmp/countries.json".to_string()),
            },
            restcountries: RestCountriesConfig {
                base_url: None,
                timeout_secs: Some(3),
            },
            clock: ClockConfig {
                max_ticks: Some(1),
                interval_ms: Some(250),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.timeout_secs, 3);
        assert_eq!(resolved.clock_max_ticks, Some(1));
        assert_eq!(resolved.clock_interval_ms, 250);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = AtlasConfig {
            general: GeneralConfig {
                default_source: Some("snapshot".to_string()),
                snapshot_path: Some("from-config.json".to_string()),
            },
            restcountries: RestCountriesConfig {
                base_url: Some("http://config.example".to_string()),
                timeout_secs: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            source: Some("restcountries"),
            snapshot_path: Some(Path::new("from-cli.json")),
            base_url: Some("http://cli.example/"),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.source, "restcountries");
        assert_eq!(resolved.snapshot_path, Some(PathBuf::from("from-cli.json")));
        // Trailing slash is trimmed so endpoint paths join cleanly
        assert_eq!(resolved.restcountries_base_url, "http://cli.example");
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AtlasConfig {
            clock: ClockConfig {
                max_ticks: None,
                interval_ms: Some(0),
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config, &CliOverrides::default()).clock_interval_ms, 1);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
default_source = "snapshot"
snapshot_path = "countries.json"

[restcountries]
base_url = "http://localhost:8080/v3.1"
timeout_secs = 5

[clock]
max_ticks = 1
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_source.as_deref(), Some("snapshot"));
        assert_eq!(config.restcountries.timeout_secs, Some(5));
        assert_eq!(config.clock.max_ticks, Some(1));
        assert_eq!(config.clock.interval_ms, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[clock]
interval_ms = 500
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.clock.interval_ms, Some(500));
        assert!(config.general.default_source.is_none());
        assert!(config.restcountries.base_url.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("atlas-bad-config-{}.toml", std::process::id()));
        fs::write(&path, "[clock\nmax_ticks = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
