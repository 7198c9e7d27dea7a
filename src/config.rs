use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::Roster;
use crate::persist::{FileStore, SaveMode};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub save: SaveConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: String,
    pub second: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: "A".to_string(),
            second: "B".to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Directory holding save files
    pub dir: PathBuf,
    /// File name prefix that marks a save file
    pub prefix: String,
    /// Write the game name as the first line of each save
    pub named: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            dir: PathBuf::from("."),
            prefix: "board.".to_string(),
            named: true,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; logging is off when unset
    pub file: Option<PathBuf>,
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [
            ("players.first", &self.players.first),
            ("players.second", &self.players.second),
        ] {
            if name.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if name.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain whitespace"
                )));
            }
        }
        if self.players.first == self.players.second {
            return Err(ConfigError::Validation(
                "players.first and players.second must differ".into(),
            ));
        }
        if self.save.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "save.prefix must not be empty".into(),
            ));
        }
        if self.save.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "save.prefix must not contain path separators".into(),
            ));
        }
        if self.log.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "log.level '{}' is not a valid level",
                self.log.level
            )));
        }
        Ok(())
    }

    /// Player names as a roster
    pub fn roster(&self) -> Roster {
        Roster::new(self.players.first.clone(), self.players.second.clone())
    }

    pub fn save_mode(&self) -> SaveMode {
        if self.save.named {
            SaveMode::Named
        } else {
            SaveMode::Anonymous
        }
    }

    /// Save store described by the `[save]` section
    pub fn store(&self) -> FileStore {
        FileStore::new(self.save.dir.clone(), self.save.prefix.clone(), self.save_mode())
    }

    /// Render the default configuration as a TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
