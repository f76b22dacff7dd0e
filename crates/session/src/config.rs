//! Session defaults loaded from TOML

use std::path::{Path, PathBuf};

use chess_core::Side;
use heuristic_engine::Difficulty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Starting settings for a session.
///
/// ```toml
/// human_side = "black"
/// difficulty = "hard"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Side the human plays (None = ask)
    pub human_side: Option<Side>,
    /// Opponent strength at startup
    pub difficulty: Difficulty,
    /// Seed for the opponent's random choices (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human_side: None,
            difficulty: Difficulty::Easy,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn parses_every_field() {
        let config = SessionConfig::from_toml_str(
            "human_side = \"black\"\ndifficulty = \"hard\"\nseed = 42\n",
        )
        .unwrap();
        assert_eq!(config.human_side, Some(Side::Black));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn unknown_difficulty_is_a_parse_error() {
        let err = SessionConfig::from_toml_str("difficulty = \"grandmaster\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SessionConfig::load(Path::new("/nonexistent/chess.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
