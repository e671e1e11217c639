//! Engine configuration.

use crate::core::constants::{COUNTER_ATTACK_DELAY_MS, HEAT_DECAY_INTERVAL_SECONDS};
use crate::error::ConfigError;
use crate::items::drops::RarityExclusions;
use crate::items::types::Rarity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knobs a host can set per session. Every field has a default, so `{}` is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for the session (None = random)
    pub seed: Option<u64>,
    /// Session time between a player hit and the enemy's answer
    pub counter_attack_delay_ms: u64,
    pub heat_decay_interval_secs: u64,
    /// Drops at or above this rarity trigger a notification
    pub notify_threshold: Rarity,
    /// Drops of these rarities are discarded
    pub excluded_rarities: RarityExclusions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            counter_attack_delay_ms: COUNTER_ATTACK_DELAY_MS,
            heat_decay_interval_secs: HEAT_DECAY_INTERVAL_SECONDS,
            notify_threshold: Rarity::Legendary,
            excluded_rarities: RarityExclusions::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heat_decay_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "heat_decay_interval_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn counter_attack_delay(&self) -> Duration {
        Duration::from_millis(self.counter_attack_delay_ms)
    }

    pub fn heat_decay_interval(&self) -> Duration {
        Duration::from_secs(self.heat_decay_interval_secs)
    }
}
