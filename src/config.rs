//! Trainer configuration, read from an optional TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "OPENING_TRAINER_CONFIG";

/// Config file looked up in the working directory when the variable is unset
const DEFAULT_CONFIG_FILE: &str = "trainer.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Path to the openings catalog JSON
    pub catalog_path: PathBuf,
    /// Directory holding the piece SVGs; defaults to the executable's directory
    pub assets_dir: Option<PathBuf>,
    /// Pause before the computer replies to the trainee
    pub auto_play_delay_ms: u64,
    /// Pause before the computer's first move when the trainee plays Black
    pub first_move_delay_ms: u64,
    /// Fixed seed for variation selection
    pub seed: Option<u64>,
    /// Family to start once the catalog is loaded
    pub default_family: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/openings.json"),
            assets_dir: None,
            auto_play_delay_ms: 300,
            first_move_delay_ms: 100,
            seed: None,
            default_family: None,
        }
    }
}

impl TrainerConfig {
    /// Load from `$OPENING_TRAINER_CONFIG`, else `./trainer.toml`, else defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn auto_play_delay(&self) -> Duration {
        Duration::from_millis(self.auto_play_delay_ms)
    }

    pub fn first_move_delay(&self) -> Duration {
        Duration::from_millis(self.first_move_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = TrainerConfig::from_toml("").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.auto_play_delay(), Duration::from_millis(300));
        assert_eq!(config.first_move_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = TrainerConfig::from_toml(
            r#"
            catalog_path = "/srv/openings.json"
            auto_play_delay_ms = 0
            seed = 7
            default_family = "Ruy Lopez"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/srv/openings.json"));
        assert_eq!(config.auto_play_delay(), Duration::ZERO);
        assert_eq!(config.first_move_delay_ms, 100);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.default_family.as_deref(), Some("Ruy Lopez"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(TrainerConfig::from_toml("auto_play_delay_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = TrainerConfig::from_file(Path::new("/nonexistent/trainer.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
