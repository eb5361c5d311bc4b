// crates/stationflow-core/src/channels.rs

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use stationflow_parser::{FLOW_COLUMN, PRESSURE_COLUMN, TEMPERATURE_COLUMN};

/// One measured quantity at the compression station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Pressure,
    Temperature,
    Flow,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Pressure, Channel::Temperature, Channel::Flow];

    /// Canonical table column carrying this channel's measurements.
    pub fn column(&self) -> &'static str {
        match self {
            Channel::Pressure => PRESSURE_COLUMN,
            Channel::Temperature => TEMPERATURE_COLUMN,
            Channel::Flow => FLOW_COLUMN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Pressure => "pressure",
            Channel::Temperature => "temperature",
            Channel::Flow => "flow",
        }
    }

    /// Registry entries are laid out in `Channel::ALL` order, so the lookup
    /// is a direct index per variant.
    pub fn spec(&self) -> &'static ChannelSpec {
        &CHANNEL_REGISTRY[match self {
            Channel::Pressure => 0,
            Channel::Temperature => 1,
            Channel::Flow => 2,
        }]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Channel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pressure" | "pressure_barg" => Ok(Channel::Pressure),
            "temperature" | "temperature_c" => Ok(Channel::Temperature),
            "flow" | "flow_rate" | "flow_mmscfd" => Ok(Channel::Flow),
            other => Err(format!("unknown channel '{other}'")),
        }
    }
}

/// Static metadata for one channel: display text, units, and the default
/// synthesis range used when no configuration file overrides it.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub label: &'static str,
    pub unit: &'static str,
    pub default_min: f64,
    pub default_max: f64,
}

pub static CHANNEL_REGISTRY: Lazy<Vec<ChannelSpec>> = Lazy::new(|| {
    vec![
        ChannelSpec {
            channel: Channel::Pressure,
            label: "Inlet Pressure",
            unit: "barg",
            default_min: 50.0,
            default_max: 100.0,
        },
        ChannelSpec {
            channel: Channel::Temperature,
            label: "Inlet Temperature",
            unit: "°C",
            default_min: 20.0,
            default_max: 40.0,
        },
        ChannelSpec {
            channel: Channel::Flow,
            label: "Inlet Flow",
            unit: "MMscfd",
            default_min: 10.0,
            default_max: 30.0,
        },
    ]
});
