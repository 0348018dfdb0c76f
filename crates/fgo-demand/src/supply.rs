//! Reads child and template supply counters through a [`ContractReader`].
//!
//! Children are decoded by field name from the `ChildMetadata` struct;
//! templates by output position (see [`fgo_types::schema`]). Missing counters
//! read as zero. A field that is present with the wrong type is malformed.

use alloy_primitives::{Address, U256};
use fgo_types::abi::AbiValue;
use fgo_types::schema::{child_fields, template_fields, CHILD_METADATA_FN, TEMPLATE_FN};
use fgo_types::{Availability, ChildSupplySnapshot, TemplateChildReference, TemplateSupplySnapshot};

use crate::client::{ContractCall, ContractReader};
use crate::error::ChainReadError;

pub struct SupplyReader<'a> {
    reader: &'a dyn ContractReader,
}

impl<'a> SupplyReader<'a> {
    pub fn new(reader: &'a dyn ContractReader) -> Self {
        Self { reader }
    }

    pub async fn read_child_supply(
        &self,
        child_contract: Address,
        child_id: U256,
    ) -> Result<ChildSupplySnapshot, ChainReadError> {
        let call = ContractCall::by_id(child_contract, CHILD_METADATA_FN, child_id);
        let value = self.reader.read_contract(call).await?;
        decode_child_metadata(&value)
    }

    /// Read only the `isFutures` flag of a child; other fields are not
    /// decoded, so a bad counter or availability does not fail the read.
    pub async fn read_futures_flag(
        &self,
        child_contract: Address,
        child_id: U256,
    ) -> Result<bool, ChainReadError> {
        let call = ContractCall::by_id(child_contract, CHILD_METADATA_FN, child_id);
        let value = self.reader.read_contract(call).await?;
        decode_futures_flag(&value)
    }

    pub async fn read_template_supply(
        &self,
        template_contract: Address,
        template_id: U256,
    ) -> Result<TemplateSupplySnapshot, ChainReadError> {
        let call = ContractCall::by_id(template_contract, TEMPLATE_FN, template_id);
        let value = self.reader.read_contract(call).await?;
        decode_template(&value)
    }
}

/// Normalise a decoded `ChildMetadata` struct.
pub fn decode_child_metadata(value: &AbiValue) -> Result<ChildSupplySnapshot, ChainReadError> {
    expect_tuple(value, "child metadata")?;

    let uint = |name: &str| uint_or_zero(value.field(name), name);
    let availability = match value.field(child_fields::AVAILABILITY) {
        None => Availability::default(),
        Some(raw) => {
            let raw = raw
                .as_uint()
                .ok_or_else(|| wrong_type(child_fields::AVAILABILITY, "uint8"))?;
            let byte = u8::try_from(raw).map_err(|_| {
                ChainReadError::Malformed(format!("availability {raw} out of range"))
            })?;
            Availability::try_from(byte).map_err(ChainReadError::Malformed)?
        }
    };
    let is_futures = futures_flag(value)?;

    Ok(ChildSupplySnapshot {
        max_physical_editions: uint(child_fields::MAX_PHYSICAL_EDITIONS)?,
        current_physical_editions: uint(child_fields::CURRENT_PHYSICAL_EDITIONS)?,
        current_digital_editions: uint(child_fields::CURRENT_DIGITAL_EDITIONS)?,
        max_digital_editions: uint(child_fields::MAX_DIGITAL_EDITIONS)?,
        total_reserved_supply: uint(child_fields::TOTAL_RESERVED_SUPPLY)?,
        availability,
        is_futures,
    })
}

/// `futures.isFutures` of a `ChildMetadata` struct, absent reading as false.
pub fn decode_futures_flag(value: &AbiValue) -> Result<bool, ChainReadError> {
    expect_tuple(value, "child metadata")?;
    futures_flag(value)
}

fn futures_flag(value: &AbiValue) -> Result<bool, ChainReadError> {
    match value
        .field(child_fields::FUTURES)
        .and_then(|f| f.get(child_fields::FUTURES_IS_FUTURES_INDEX))
    {
        None => Ok(false),
        Some(flag) => flag.as_bool().ok_or_else(|| wrong_type("isFutures", "bool")),
    }
}

/// Normalise the positional outputs of `getTemplate`.
pub fn decode_template(value: &AbiValue) -> Result<TemplateSupplySnapshot, ChainReadError> {
    expect_tuple(value, "template")?;

    let uint = |index: usize| uint_or_zero(value.get(index), &format!("output {index}"));
    let child_references = match value.get(template_fields::CHILD_REFERENCES) {
        None => Vec::new(),
        Some(refs) => refs
            .as_array()
            .ok_or_else(|| wrong_type("childReferences", "tuple[]"))?
            .iter()
            .map(decode_child_reference)
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(TemplateSupplySnapshot {
        max_physical_editions: uint(template_fields::MAX_PHYSICAL_EDITIONS)?,
        current_physical_editions: uint(template_fields::CURRENT_PHYSICAL_EDITIONS)?,
        current_digital_editions: uint(template_fields::CURRENT_DIGITAL_EDITIONS)?,
        total_reserved_supply: uint(template_fields::TOTAL_RESERVED_SUPPLY)?,
        child_references,
    })
}

fn decode_child_reference(entry: &AbiValue) -> Result<TemplateChildReference, ChainReadError> {
    let child_contract = entry
        .get(template_fields::REF_CHILD_CONTRACT)
        .and_then(AbiValue::as_address)
        .ok_or_else(|| wrong_type("childReferences[].childContract", "address"))?;
    let child_id = entry
        .get(template_fields::REF_CHILD_ID)
        .and_then(AbiValue::as_uint)
        .ok_or_else(|| wrong_type("childReferences[].childId", "uint256"))?;
    let amount = uint_or_zero(entry.get(template_fields::REF_AMOUNT), "childReferences[].amount")?;
    Ok(TemplateChildReference { child_contract, child_id, amount })
}

fn expect_tuple(value: &AbiValue, what: &str) -> Result<(), ChainReadError> {
    match value {
        AbiValue::Tuple(_) => Ok(()),
        other => Err(ChainReadError::Malformed(format!("{what}: expected tuple, got {other:?}"))),
    }
}

fn uint_or_zero(value: Option<&AbiValue>, name: &str) -> Result<U256, ChainReadError> {
    match value {
        None => Ok(U256::ZERO),
        Some(v) => v.as_uint().ok_or_else(|| wrong_type(name, "uint")),
    }
}

fn wrong_type(name: &str, expected: &str) -> ChainReadError {
    ChainReadError::Malformed(format!("{name}: expected {expected}"))
}
