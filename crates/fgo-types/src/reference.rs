//! Bill-of-materials edges and the demand a parent puts on them.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::Availability;

/// One edge in a bill-of-materials graph.
///
/// `amount` is consumed per single edition of the referencing item, so the
/// total required is `amount × editions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildReferenceInput {
    pub child_contract: Address,
    #[serde(with = "crate::decimal")]
    pub child_id: U256,
    #[serde(with = "crate::decimal")]
    pub amount: U256,
    #[serde(default)]
    pub is_template: bool,
}

impl ChildReferenceInput {
    pub fn child(child_contract: Address, child_id: U256, amount: U256) -> Self {
        Self { child_contract, child_id, amount, is_template: false }
    }

    pub fn template(template_contract: Address, template_id: U256, amount: U256) -> Self {
        Self { child_contract: template_contract, child_id: template_id, amount, is_template: true }
    }

    /// `amount × editions`, or `None` when the product does not fit in a
    /// `uint256`.
    pub fn required_for(&self, editions: U256) -> Option<U256> {
        self.amount.checked_mul(editions)
    }
}

/// A template's own child reference as stored on-chain. Always a leaf child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateChildReference {
    pub child_contract: Address,
    #[serde(with = "crate::decimal")]
    pub child_id: U256,
    #[serde(with = "crate::decimal")]
    pub amount: U256,
}

/// Editions of a parent being minted, per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDemand {
    #[serde(with = "crate::decimal", default)]
    pub max_digital_editions: U256,
    #[serde(with = "crate::decimal", default)]
    pub max_physical_editions: U256,
    pub availability: Availability,
}

impl ParentDemand {
    /// Editions the parent mints on `channel`.
    pub fn editions(&self, channel: crate::Channel) -> U256 {
        match channel {
            crate::Channel::Digital => self.max_digital_editions,
            crate::Channel::Physical => self.max_physical_editions,
        }
    }

    /// Multiplier handed to template validation: digital editions when set,
    /// physical editions otherwise. Loses information when both are set and
    /// differ.
    pub fn template_multiplier(&self) -> U256 {
        if self.max_digital_editions.is_zero() {
            self.max_physical_editions
        } else {
            self.max_digital_editions
        }
    }
}
