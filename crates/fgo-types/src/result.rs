//! Validation outputs. Built fresh per call, append-only while a validation
//! runs, then handed to the caller as plain data.

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

use crate::credits::to_signed;
use crate::{Availability, Channel};

/// One required-vs-available check, recorded whether it passed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildValidation {
    pub child_contract: Address,
    #[serde(with = "crate::decimal")]
    pub child_id: U256,
    #[serde(with = "crate::decimal")]
    pub required: U256,
    #[serde(with = "crate::decimal")]
    pub available: U256,
    #[serde(with = "crate::decimal")]
    pub max_editions: U256,
    #[serde(with = "crate::decimal")]
    pub current_editions: U256,
    #[serde(with = "crate::decimal")]
    pub reserved_supply: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

impl ChildValidation {
    pub fn passed(&self) -> bool {
        self.required <= self.available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub child_validations: Vec<ChildValidation>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self { is_valid: true, errors: Vec::new(), child_validations: Vec::new() }
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark invalid and append a diagnostic.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    pub fn record(&mut self, validation: ChildValidation) {
        self.child_validations.push(validation);
    }

    /// Append another result after this one, keeping discovery order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.child_validations.extend(other.child_validations);
    }

    /// Errors joined one per line, as shown to users.
    pub fn error_summary(&self) -> String {
        self.errors.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCredits {
    #[serde(with = "crate::decimal")]
    pub digital: U256,
    #[serde(with = "crate::decimal")]
    pub physical: U256,
}

impl RequiredCredits {
    /// Split `total` across the channels `availability` mints on.
    pub fn split(total: U256, availability: Availability) -> Self {
        match availability {
            Availability::DigitalOnly => Self { digital: total, physical: U256::ZERO },
            Availability::PhysicalOnly => Self { digital: U256::ZERO, physical: total },
            Availability::Both => Self { digital: total, physical: total },
        }
    }

    /// Only the physical requirement is held against the credit balance.
    pub fn physical_exceeds(&self, available: I256) -> bool {
        to_signed(self.physical) > available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCheck {
    pub child_contract: Address,
    #[serde(with = "crate::decimal")]
    pub child_id: U256,
    pub required: RequiredCredits,
    /// `credits − consumed`; negative when over-consumed upstream.
    #[serde(with = "crate::decimal::signed")]
    pub available: I256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesCreditsValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub credit_checks: Vec<CreditCheck>,
}

impl Default for FuturesCreditsValidationResult {
    fn default() -> Self {
        Self { is_valid: true, errors: Vec::new(), credit_checks: Vec::new() }
    }
}

impl FuturesCreditsValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    pub fn record(&mut self, check: CreditCheck) {
        self.credit_checks.push(check);
    }

    pub fn error_summary(&self) -> String {
        self.errors.join("\n")
    }
}
