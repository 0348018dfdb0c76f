//! Shared types and pure-logic utilities for FGO supply validation.
//! No I/O here; the validation engine, the HTTP service and tests all build on it.

pub mod abi;
mod availability;
mod credits;
pub mod decimal;
mod dictionary;
mod error;
mod reference;
mod result;
pub mod schema;
mod supply;

pub use availability::{Availability, Channel};
pub use credits::{FutureCredit, UserCredits};
pub use dictionary::{Dictionary, MessageKey};
pub use error::AbiError;
pub use reference::{ChildReferenceInput, ParentDemand, TemplateChildReference};
pub use result::{
    ChildValidation, CreditCheck, FuturesCreditsValidationResult, RequiredCredits,
    ValidationResult,
};
pub use supply::{ChildSupplySnapshot, TemplateSupplySnapshot};

pub use alloy_primitives::{Address, I256, U256};
