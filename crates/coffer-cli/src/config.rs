//! Configuration file handling and path resolution.
//!
//! The config lives at `$XDG_CONFIG_HOME/coffer/config.toml` (overridable
//! with `COFFER_CONFIG`) and records the container path plus the cipher
//! offset the session is constructed with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use coffer_core::cipher::MIN_OFFSET;

use crate::errors::CliError;

/// Offset used when the config does not specify one. Matches the minimum,
/// which is also what existing container files were written with.
pub const DEFAULT_OFFSET: u64 = 100;

#[derive(Debug, Serialize, Deserialize)]
pub struct CofferConfig {
    pub container: ContainerSection,
    #[serde(default)]
    pub cipher: CipherSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContainerSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CipherSection {
    #[serde(default = "default_offset")]
    pub offset: u64,
}

impl Default for CipherSection {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
        }
    }
}

fn default_offset() -> u64 {
    DEFAULT_OFFSET
}

impl CofferConfig {
    pub fn new(container_path: PathBuf, offset: u64) -> Self {
        Self {
            container: ContainerSection {
                path: container_path.to_string_lossy().to_string(),
            },
            cipher: CipherSection { offset },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("COFFER_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_container_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("accounts.pwords"))
}

pub fn read_config(path: &Path) -> anyhow::Result<CofferConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &CofferConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

/// Resolves the container path: explicit argument, then the global
/// `--container`/`COFFER_PATH` value, then the config file.
pub fn resolve_container_path(
    flag: Option<&str>,
    arg: Option<&str>,
) -> anyhow::Result<PathBuf> {
    if let Some(value) = arg.or(flag) {
        return Ok(PathBuf::from(value));
    }

    let config_path = default_config_path()?;
    if config_path.exists() {
        let config = read_config(&config_path)?;
        return Ok(PathBuf::from(config.container.path));
    }

    Err(anyhow::Error::new(CliError::not_found(
        format!("No container configured at {}", config_path.display()),
        "Hint: run `coffer init`, or pass --container / set COFFER_PATH.",
    )))
}

/// Resolves the cipher offset from the config file, falling back to
/// [`DEFAULT_OFFSET`]. The value is validated against the cipher minimum so
/// a bad config fails here rather than deep inside session construction.
pub fn resolve_offset() -> anyhow::Result<u64> {
    let config_path = default_config_path()?;
    if !config_path.exists() {
        return Ok(DEFAULT_OFFSET);
    }

    let offset = read_config(&config_path)?.cipher.offset;
    if offset < MIN_OFFSET {
        return Err(anyhow::anyhow!(
            "Configured cipher offset {} is below the minimum of {}",
            offset,
            MIN_OFFSET
        ));
    }
    Ok(offset)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("coffer"));
        }
    }
    Ok(home_dir()?.join(".config").join("coffer"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("coffer"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("coffer"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let config = CofferConfig::new(PathBuf::from("/tmp/accounts.pwords"), 150);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: CofferConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.container.path, "/tmp/accounts.pwords");
        assert_eq!(parsed.cipher.offset, 150);
    }

    #[test]
    fn test_missing_cipher_section_defaults_offset() {
        let parsed: CofferConfig = toml::from_str(
            "[container]\npath = \"/tmp/accounts.pwords\"\n",
        )
        .unwrap();
        assert_eq!(parsed.cipher.offset, DEFAULT_OFFSET);
    }

    #[test]
    fn test_explicit_path_wins_over_config() {
        let resolved = resolve_container_path(Some("/flag.pwords"), Some("/arg.pwords")).unwrap();
        assert_eq!(resolved, PathBuf::from("/arg.pwords"));

        let resolved = resolve_container_path(Some("/flag.pwords"), None).unwrap();
        assert_eq!(resolved, PathBuf::from("/flag.pwords"));
    }
}
