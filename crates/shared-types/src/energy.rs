//! Renewable energy-source tags mixed into the proof-of-work digest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic energy-source tag chosen by the miner.
///
/// The tag is concatenated into the seal digest, so a block commits to
/// the source its miner declared. Only these four tags are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    /// Photovoltaic.
    Solar,
    /// Wind turbine.
    Wind,
    /// Hydroelectric.
    Hydro,
    /// Geothermal.
    Geothermal,
}

impl EnergySource {
    /// Every recognized tag.
    pub const ALL: [EnergySource; 4] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Hydro,
        EnergySource::Geothermal,
    ];

    /// Lowercase wire form of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySource::Solar => "solar",
            EnergySource::Wind => "wind",
            EnergySource::Hydro => "hydro",
            EnergySource::Geothermal => "geothermal",
        }
    }

    /// Parse a wire tag; `None` for unrecognized input.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "solar" => Some(EnergySource::Solar),
            "wind" => Some(EnergySource::Wind),
            "hydro" => Some(EnergySource::Hydro),
            "geothermal" => Some(EnergySource::Geothermal),
            _ => None,
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
