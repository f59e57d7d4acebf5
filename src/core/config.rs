//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.arcview/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::zip_decoder::DEFAULT_MAX_TEXT_BYTES;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ArcviewConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ViewerConfig {
    pub max_text_bytes: Option<u64>,
    pub sidebar_width: Option<u16>,
    pub expand_all: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "arcview.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
/// Percentage of the terminal width given to the file tree.
pub const DEFAULT_SIDEBAR_WIDTH: u16 = 25;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub max_text_bytes: u64,
    pub sidebar_width: u16,
    pub expand_all: bool,
    /// Rejected values, to be logged once logging is up.
    pub warnings: Vec<String>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
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

/// Returns the path to `~/.arcview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".arcview").join("config.toml"))
}

/// Load config from `~/.arcview/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ArcviewConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ArcviewConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ArcviewConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ArcviewConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ArcviewConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ArcviewConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# arcview Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "arcview.log"           # Or set ARCVIEW_LOG_FILE env var

# [viewer]
# max_text_bytes = 4194304           # Larger entries are shown as unreadable
# sidebar_width = 25                 # Percent of the terminal width
# expand_all = false                 # Expand every directory after import
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

/// Parse a level name, recording rejected values in `warnings`.
fn parse_level(value: &str, warnings: &mut Vec<String>) -> Option<LevelFilter> {
    match value.parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warnings.push(format!("Ignoring unknown log level {value:?}"));
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// Problems found along the way end up in `ResolvedConfig::warnings`; the
/// logger is not running yet, so the caller logs them once it is.
pub fn resolve(config: &ArcviewConfig, cli: &CliOverrides) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Log level: CLI → env → config → default
    let env_level = std::env::var("ARCVIEW_LOG_LEVEL").ok();
    let log_level = [
        cli.log_level.as_deref(),
        env_level.as_deref(),
        config.general.log_level.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(|value| parse_level(value, &mut warnings))
    .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var("ARCVIEW_LOG_FILE").ok().map(PathBuf::from))
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // Text limit: env → config → default
    let max_text_bytes = std::env::var("ARCVIEW_MAX_TEXT_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.viewer.max_text_bytes)
        .unwrap_or(DEFAULT_MAX_TEXT_BYTES);

    ResolvedConfig {
        log_level,
        log_file,
        max_text_bytes,
        sidebar_width: config
            .viewer
            .sidebar_width
            .unwrap_or(DEFAULT_SIDEBAR_WIDTH)
            .clamp(10, 60),
        expand_all: config.viewer.expand_all.unwrap_or(false),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ArcviewConfig::default();
        assert!(config.general.log_level.is_none());
        assert!(config.viewer.max_text_bytes.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ArcviewConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
        assert!(!resolved.expand_all);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ArcviewConfig {
            viewer: ViewerConfig {
                max_text_bytes: Some(1024),
                sidebar_width: Some(40),
                expand_all: Some(true),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.sidebar_width, 40);
        assert!(resolved.expand_all);
    }

    #[test]
    fn test_sidebar_width_is_clamped() {
        let config = ArcviewConfig {
            viewer: ViewerConfig {
                sidebar_width: Some(95),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config, &CliOverrides::default()).sidebar_width, 60);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ArcviewConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                log_file: Some("from-config.log".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            log_level: Some("trace".to_string()),
            log_file: Some(PathBuf::from("from-cli.log")),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, PathBuf::from("from-cli.log"));
    }

    #[test]
    fn test_bad_cli_level_falls_through() {
        let config = ArcviewConfig {
            general: GeneralConfig {
                log_level: Some("error".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        // Env may be set by the developer; only assert the CLI value was rejected.
        let resolved = resolve(&config, &cli);
        assert_ne!(resolved.log_level, LevelFilter::Trace);
        assert!(resolved.warnings.iter().any(|w| w.contains("\"loud\"")));
    }

    #[test]
    fn test_valid_levels_leave_no_warnings() {
        let cli = CliOverrides {
            log_level: Some("info".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&ArcviewConfig::default(), &cli);
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "info"
log_file = "/tmp/arcview.log"

[viewer]
max_text_bytes = 2048
sidebar_width = 30
expand_all = true
"#;
        let config: ArcviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.general.log_file.as_deref(), Some("/tmp/arcview.log"));
        assert_eq!(config.viewer.max_text_bytes, Some(2048));
        assert_eq!(config.viewer.sidebar_width, Some(30));
        assert_eq!(config.viewer.expand_all, Some(true));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[viewer]
expand_all = true
"#;
        let config: ArcviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.viewer.expand_all, Some(true));
        assert!(config.viewer.max_text_bytes.is_none());
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("arcview-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[viewer\nexpand_all = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));

        let _ = fs::remove_dir_all(&dir);
    }
}
