//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use rpp::{RppError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for RppError {
    fn from(err: ConfigError) -> Self {
        RppError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (rpp/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, RppError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("rpp/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "rpp", "rpp") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, RppError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content).map_err(|message| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        }
        .into()
    })
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    toml::from_str(content).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rpp::SourceFallback;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [parser]
            opaque_tags = ["NOTES", "VST"]

            [items]
            source_fallback = "deny"
            "#,
        )
        .unwrap();

        assert_eq!(config.parser().opaque_tags(), ["NOTES", "VST"]);
        assert_eq!(config.items().source_fallback(), SourceFallback::Deny);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[items]\nsource_fallback = \"name\"\n").unwrap();

        assert_eq!(
            config.parser().opaque_tags(),
            ["COMMENT", "RENDER_CFG", "VST"]
        );
        assert_eq!(config.items().source_fallback(), SourceFallback::Name);

        let config = parse_config("").unwrap();
        assert_eq!(config.items().source_fallback(), SourceFallback::Name);
    }

    #[test]
    fn test_invalid_fallback_is_rejected() {
        assert!(parse_config("[items]\nsource_fallback = \"guess\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nopaque_tags = []").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!(config.parser().opaque_tags().is_empty());
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.toml"))).unwrap_err();

        assert!(matches!(err, RppError::Config(message) if message.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parser\nopaque_tags = 3").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, RppError::Config(_)));
    }
}
