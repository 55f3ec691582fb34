//! TOML-based application configuration.
//!
//! Stores the session length and the reward-rule thresholds.
//! Configuration lives at `~/.config/pomoharvest/config.toml`
//! (`~/.config/pomoharvest-dev/` when `POMOHARVEST_ENV=dev`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};
use crate::rewards::RewardRules;

fn default_focus_minutes() -> u32 {
    25
}

fn default_challenge_target() -> u32 {
    2
}

fn default_streak_activation() -> u32 {
    3
}

/// Countdown session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
        }
    }
}

/// Reward-rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Completions per day that count as the daily challenge.
    #[serde(default = "default_challenge_target")]
    pub daily_challenge_target: u32,
    /// Consecutive challenge days before the streak bonus activates.
    #[serde(default = "default_streak_activation")]
    pub streak_activation: u32,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            daily_challenge_target: default_challenge_target(),
            streak_activation: default_streak_activation(),
        }
    }
}

impl RewardsConfig {
    pub fn rules(&self) -> RewardRules {
        RewardRules {
            daily_challenge_target: self.daily_challenge_target,
            streak_activation: self.streak_activation,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomoharvest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

/// Returns `~/.config/pomoharvest[-dev]/` based on POMOHARVEST_ENV.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOHARVEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomoharvest-dev")
    } else {
        base_dir.join("pomoharvest")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply a `key = value` update from the CLI.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not a positive integer"),
        })?;
        if parsed == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        match key {
            "focus-minutes" => self.session.focus_minutes = parsed,
            "daily-challenge-target" => self.rewards.daily_challenge_target = parsed,
            "streak-activation" => self.rewards.streak_activation = parsed,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let cfg = Config::default();
        assert_eq!(cfg.session.focus_minutes, 25);
        assert_eq!(cfg.rewards.daily_challenge_target, 2);
        assert_eq!(cfg.rewards.streak_activation, 3);
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.session.focus_minutes = 50;
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.focus_minutes, 50);
        assert_eq!(parsed.rewards.daily_challenge_target, 2);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[session]\nfocus_minutes = 15\n").unwrap();
        assert_eq!(parsed.session.focus_minutes, 15);
        assert_eq!(parsed.rewards.streak_activation, 3);
    }

    #[test]
    fn save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("focus-minutes", "45").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.focus_minutes, 45);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.session.focus_minutes, 25);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("focus-minutes", "abc").is_err());
        assert!(cfg.set("focus-minutes", "0").is_err());
        assert!(cfg.set("no-such-key", "5").is_err());
    }
}
