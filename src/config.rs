use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::angle::EvaluatorConfig;
use crate::error::{ConfigError, Result};
use crate::movement::MovementConfig;
use crate::presets;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub movements: Vec<MovementConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorConfig::default(),
            movements: presets::all(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.evaluator.validate()?;

        let mut names = HashSet::new();
        for movement in &self.movements {
            movement.validate()?;
            if !names.insert(movement.name.as_str()) {
                return Err(ConfigError::DuplicateMovement(movement.name.clone()));
            }
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from the default location, or fall back to the built-in movements.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".rep_sentinel").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn movement(&self, name: &str) -> Option<&MovementConfig> {
        self.movements.iter().find(|m| m.name == name)
    }
}
