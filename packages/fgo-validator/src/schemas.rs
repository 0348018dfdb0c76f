//! Request bodies for the validation endpoints.

use alloy_primitives::{Address, U256};
use fgo_types::{Availability, ChildReferenceInput, Dictionary, ParentDemand};
use serde::{Deserialize, Serialize};

/// `POST /validate/parent`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentValidationRequest {
    pub references: Vec<ChildReferenceInput>,
    pub parent: ParentDemand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Dictionary>,
}

/// `POST /validate/template`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValidationRequest {
    pub references: Vec<ChildReferenceInput>,
    #[serde(with = "fgo_types::decimal")]
    pub template_editions: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Dictionary>,
}

/// `POST /validate/futures`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesValidationRequest {
    pub references: Vec<ChildReferenceInput>,
    #[serde(with = "fgo_types::decimal")]
    pub editions: U256,
    pub user: Address,
    /// No default: digital-only demand is never held against credits.
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Dictionary>,
}
