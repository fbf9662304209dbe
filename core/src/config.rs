// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::rules::Engine;
use crate::{GameError, Origin, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for a ConHex session, stored as TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_size")]
    pub board_size: u8,
    /// Notation used for coordinates and the swap axis
    #[serde(default)]
    pub origin: Origin,
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_board_size() -> u8 {
    DEFAULT_BOARD_SIZE
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            origin: Origin::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        Ok(())
    }

    /// Engine for the configured size and origin
    pub fn engine(&self) -> Result<Engine, GameError> {
        self.validate()?;
        Engine::new(self.board_size, self.origin)
    }
}

/// Load the config at `path`, writing the default there first if it is missing
pub fn load_config(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        tracing::info!("Config file not found, creating default at: {}", path.display());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = BoardConfig::default();
        save_config(path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: BoardConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    tracing::debug!(?config, "Loaded config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &BoardConfig) -> Result<()> {
    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.origin, Origin::ConhexCom);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BoardConfig = toml::from_str(r#"origin = "little-golem""#).unwrap();
        assert_eq!(config.origin, Origin::LittleGolem);
        assert_eq!(config.board_size, 5);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_save_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("conhex.toml");

        let created = load_config(&path)?;
        assert_eq!(created, BoardConfig::default());
        assert!(path.exists());

        let custom = BoardConfig {
            board_size: 7,
            origin: Origin::LittleGolem,
            log_filter: "debug".to_string(),
        };
        save_config(&path, &custom)?;
        assert_eq!(load_config(&path)?, custom);
        Ok(())
    }

    #[test]
    fn test_invalid_size_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("conhex.toml");
        fs::write(&path, "board_size = 20\n")?;
        assert!(load_config(&path).is_err());
        Ok(())
    }
}
