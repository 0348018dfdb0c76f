//! Distribution channels an item participates in.

use serde::{Deserialize, Serialize};

/// On-chain availability flag. Wire form is the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Availability {
    #[default]
    DigitalOnly = 0,
    PhysicalOnly = 1,
    Both = 2,
}

impl Availability {
    pub fn supports_digital(self) -> bool {
        matches!(self, Self::DigitalOnly | Self::Both)
    }

    pub fn supports_physical(self) -> bool {
        matches!(self, Self::PhysicalOnly | Self::Both)
    }

    /// Channels in checking order: digital before physical.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        [
            self.supports_digital().then_some(Channel::Digital),
            self.supports_physical().then_some(Channel::Physical),
        ]
        .into_iter()
        .flatten()
    }

    pub fn supports(self, channel: Channel) -> bool {
        match channel {
            Channel::Digital => self.supports_digital(),
            Channel::Physical => self.supports_physical(),
        }
    }
}

impl TryFrom<u8> for Availability {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::DigitalOnly),
            1 => Ok(Self::PhysicalOnly),
            2 => Ok(Self::Both),
            other => Err(format!("unknown availability {other}, expected 0, 1 or 2")),
        }
    }
}

impl From<Availability> for u8 {
    fn from(value: Availability) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Digital,
    Physical,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Digital => "digital",
            Self::Physical => "physical",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
