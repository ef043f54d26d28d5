//! Configuration discovery
//!
//! `--config <path>` wins, then `<config dir>/doicheck/config.toml`, then
//! built-in defaults. `DOICHECK_MAILTO` overrides the contact email.

use std::path::{Path, PathBuf};

use doicheck_core::{ConfigError, DoicheckConfig};
use thiserror::Error;
use tracing::debug;

pub const MAILTO_ENV: &str = "DOICHECK_MAILTO";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Invalid { path: PathBuf, source: ConfigError },

    #[error("Invalid config: {0}")]
    OutOfRange(#[from] ConfigError),
}

/// Default location of the config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("doicheck").join("config.toml"))
}

fn read_file(path: &Path) -> Result<DoicheckConfig, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    DoicheckConfig::from_toml(&text).map_err(|source| SettingsError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the effective configuration
pub fn load(
    explicit: Option<&Path>,
    mailto_override: Option<String>,
) -> Result<DoicheckConfig, SettingsError> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "using config file");
                read_file(&path)?
            }
            None => DoicheckConfig::default(),
        },
    };

    if let Some(mailto) = mailto_override.filter(|m| !m.trim().is_empty()) {
        config.registry.mailto = mailto;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_file_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[registry]\nmailto = \"file@example.org\"\nmax_concurrent = 3\n",
        )
        .unwrap();

        let config = load(Some(&path), None).unwrap();
        assert_eq!(config.registry.mailto, "file@example.org");
        assert_eq!(config.registry.max_concurrent, 3);
        assert_eq!(config.reader.chunk_size, 64 * 1024);

        let config = load(Some(&path), Some("env@example.org".to_string())).unwrap();
        assert_eq!(config.registry.mailto, "env@example.org");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load(Some(Path::new("/nonexistent/doicheck.toml")), None).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_out_of_range_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\nmax_concurrent = 0\n").unwrap();

        let err = load(Some(&path), None).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange(_)));
    }
}
