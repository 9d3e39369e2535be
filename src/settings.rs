//! Broker and session settings
//!
//! Loaded from a JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::SimConfig;

/// Where to reach the broker and which topics to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    /// Tilt samples arrive here
    pub sub_topic: String,
    /// Score events are published here
    pub pub_topic: String,
    pub qos: u8,
    /// Give up connecting after this long
    pub timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "192.168.2.76".to_string(),
            port: 1883,
            sub_topic: "StA/data".to_string(),
            pub_topic: "StA/message".to_string(),
            qos: 0,
            timeout_ms: 5_000,
        }
    }
}

impl BrokerConfig {
    /// Broker URI, `tcp://host:port`
    pub fn uri(&self) -> String {
        format!("tcp://{}:{}", self.host, self.port)
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub broker: BrokerConfig,
    pub sim: SimConfig,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
