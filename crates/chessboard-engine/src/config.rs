//! Configuration loading.
//!
//! ```toml
//! [board]
//! width = 640.0
//! height = 640.0
//!
//! [rules]
//! castling = "standard"   # or "first-piece-found"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{BoardError, CastlingRule, Geometry, StandardRules};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Geometry(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub rules: RulesConfig,
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: 640.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub castling: CastlingRule,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the config file at `path`, or falls back to defaults when it
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Lays out the configured board size.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Ok(Geometry::new(self.board.width, self.board.height)?)
    }

    pub fn rules(&self) -> StandardRules {
        StandardRules::new(self.rules.castling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.board.width, 640.0);
        assert_eq!(config.board.height, 640.0);
        assert_eq!(config.rules.castling, CastlingRule::Standard);
        assert_eq!(config.rules(), StandardRules::default());
    }

    #[test]
    fn parses_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            [board]
            width = 800.0
            height = 600.0

            [rules]
            castling = "first-piece-found"
            "#,
        )
        .unwrap();
        assert_eq!(config.board.width, 800.0);
        assert_eq!(config.board.height, 600.0);
        assert_eq!(config.rules().castling, CastlingRule::FirstPieceFound);
        let geometry = config.geometry().unwrap();
        assert_eq!(geometry.rect(chessboard_core::Square::A8).height(), 75.0);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = EngineConfig::from_toml_str("[board]\nwidth = 320.0\n").unwrap();
        assert_eq!(config.board.width, 320.0);
        assert_eq!(config.board.height, 640.0);
        assert_eq!(config.rules.castling, CastlingRule::Standard);

        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn rejects_unknown_castling_rule() {
        let result = EngineConfig::from_toml_str("[rules]\ncastling = \"anything\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_degenerate_board() {
        let config = EngineConfig::from_toml_str("[board]\nwidth = 0.0\n").unwrap();
        assert!(matches!(
            config.geometry(),
            Err(ConfigError::Geometry(BoardError::InvalidGeometry { .. }))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[board]\nwidth = 480.0\nheight = 480.0").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.board.width, 480.0);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(dir.path().join("chessboard.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[board\nwidth = ").unwrap();
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
