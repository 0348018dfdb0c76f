//! Demand, supply and futures-credit validation for FGO parents and templates.
//!
//! Before minting parent or template editions, callers ask this crate whether
//! every child and template in the bill of materials still has enough supply
//! (per distribution channel), and whether the minting user holds enough
//! futures credit for futures-enabled children.
//!
//! The engine talks to the outside world only through two traits:
//! [`ContractReader`] for on-chain metadata and [`CreditsLookup`] for a
//! user's futures-credit ledger. Reads happen one at a time in reference
//! order, so output ordering is deterministic. Failures never escape as
//! `Err`: every problem becomes an entry in the returned result's `errors`.

mod client;
mod error;
mod futures;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
mod parent;
mod supply;
mod template;
mod validator;

pub use client::{ContractCall, ContractReader, CreditsLookup};
pub use error::{ChainReadError, CreditsLookupError};
pub use futures::lowercase_hex;
pub use supply::{decode_child_metadata, decode_template, SupplyReader};
pub use validator::DemandValidator;

pub use fgo_types::{
    Availability, ChildReferenceInput, ChildValidation, CreditCheck, Dictionary,
    FuturesCreditsValidationResult, ParentDemand, ValidationResult,
};
