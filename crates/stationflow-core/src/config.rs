// crates/stationflow-core/src/config.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::channels::Channel;
use crate::error::{Result, StationflowError};

/// Closed interval a synthesized channel value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: f64,
    pub max: f64,
}

/// Optional TOML configuration for the synthesis stage. Channels without an
/// entry fall back to the registry defaults.
///
/// ```toml
/// [channels.pressure]
/// min = 55.0
/// max = 95.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(default)]
    pub channels: BTreeMap<Channel, ChannelRange>,
}

impl StationConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: StationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (channel, range) in &self.channels {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(StationflowError::Config(format!(
                    "invalid range for channel '{channel}': min {} max {}",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }

    /// Range for one channel, configured or registry default.
    pub fn range(&self, channel: Channel) -> ChannelRange {
        self.channels.get(&channel).copied().unwrap_or_else(|| {
            let spec = channel.spec();
            ChannelRange {
                min: spec.default_min,
                max: spec.default_max,
            }
        })
    }
}
