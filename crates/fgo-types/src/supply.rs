//! Point-in-time on-chain supply counters.
//!
//! All availability figures clamp at zero: counters that overshoot their
//! maximum (or reservations that exceed what is left) read as "nothing left",
//! never as a negative quantity.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{Availability, Channel, TemplateChildReference};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSupplySnapshot {
    #[serde(with = "crate::decimal")]
    pub max_physical_editions: U256,
    #[serde(with = "crate::decimal")]
    pub current_physical_editions: U256,
    #[serde(with = "crate::decimal")]
    pub current_digital_editions: U256,
    #[serde(with = "crate::decimal")]
    pub max_digital_editions: U256,
    #[serde(with = "crate::decimal")]
    pub total_reserved_supply: U256,
    pub availability: Availability,
    pub is_futures: bool,
}

impl ChildSupplySnapshot {
    /// `max(0, maxDigital − currentDigital)`.
    pub fn digital_available(&self) -> U256 {
        self.max_digital_editions
            .saturating_sub(self.current_digital_editions)
    }

    /// `max(0, maxPhysical − currentPhysical − reserved)`.
    pub fn physical_available(&self) -> U256 {
        self.max_physical_editions
            .saturating_sub(self.current_physical_editions)
            .saturating_sub(self.total_reserved_supply)
    }

    /// Channel-less view used when the child sits under a template:
    /// `max(0, maxPhysical − (currentPhysical + currentDigital) − reserved)`.
    pub fn combined_available(&self) -> U256 {
        self.max_physical_editions
            .saturating_sub(self.combined_current())
            .saturating_sub(self.total_reserved_supply)
    }

    pub fn combined_current(&self) -> U256 {
        self.current_physical_editions
            .saturating_add(self.current_digital_editions)
    }

    pub fn available(&self, channel: Channel) -> U256 {
        match channel {
            Channel::Digital => self.digital_available(),
            Channel::Physical => self.physical_available(),
        }
    }

    pub fn max_editions(&self, channel: Channel) -> U256 {
        match channel {
            Channel::Digital => self.max_digital_editions,
            Channel::Physical => self.max_physical_editions,
        }
    }

    pub fn current_editions(&self, channel: Channel) -> U256 {
        match channel {
            Channel::Digital => self.current_digital_editions,
            Channel::Physical => self.current_physical_editions,
        }
    }

    /// Reservations only hold back physical units.
    pub fn reserved_supply(&self, channel: Channel) -> U256 {
        match channel {
            Channel::Digital => U256::ZERO,
            Channel::Physical => self.total_reserved_supply,
        }
    }

    pub fn supports(&self, channel: Channel) -> bool {
        self.availability.supports(channel)
    }
}

/// Template counters plus its own bill of materials (one level deep).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSupplySnapshot {
    #[serde(with = "crate::decimal")]
    pub max_physical_editions: U256,
    #[serde(with = "crate::decimal")]
    pub current_physical_editions: U256,
    #[serde(with = "crate::decimal")]
    pub current_digital_editions: U256,
    #[serde(with = "crate::decimal")]
    pub total_reserved_supply: U256,
    pub child_references: Vec<TemplateChildReference>,
}

impl TemplateSupplySnapshot {
    /// Channels are summed at template level.
    pub fn current_editions(&self) -> U256 {
        self.current_physical_editions
            .saturating_add(self.current_digital_editions)
    }

    /// `max(0, maxPhysical − currentEditions − reserved)`.
    pub fn available(&self) -> U256 {
        self.max_physical_editions
            .saturating_sub(self.current_editions())
            .saturating_sub(self.total_reserved_supply)
    }
}
