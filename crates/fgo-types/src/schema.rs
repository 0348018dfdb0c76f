//! On-chain read schemas for FGO child and template contracts.
//!
//! Keep these in sync with the deployed contracts. The template getter is
//! decoded by position, so any reordering of its outputs breaks
//! [`template_fields`] silently.
//!
//! Schema v1
//!
//! `getChildMetadata(uint256 childId)` returns one `ChildMetadata` struct:
//!
//! | # | field                     | type      |
//! |---|---------------------------|-----------|
//! | 0 | digitalPrice              | uint256   |
//! | 1 | physicalPrice             | uint256   |
//! | 2 | version                   | uint256   |
//! | 3 | maxPhysicalEditions       | uint256   |
//! | 4 | maxDigitalEditions        | uint256   |
//! | 5 | currentDigitalEditions    | uint256   |
//! | 6 | currentPhysicalEditions   | uint256   |
//! | 7 | totalReservedSupply       | uint256   |
//! | 8 | supplier                  | address   |
//! | 9 | status                    | uint8     |
//! |10 | availability              | uint8     |
//! |11 | uri                       | string    |
//! |12 | futures                   | Futures   |
//!
//! `Futures` = `(uint256 deadline, uint256 maxDigitalEditions,
//! uint256 pricePerUnit, bool isFutures)`.
//!
//! `getTemplate(uint256 templateId)` returns a positional tuple:
//!
//! | # | output                    | type                          |
//! |---|---------------------------|-------------------------------|
//! | 0 | templateId                | uint256                       |
//! | 1 | digitalPrice              | uint256                       |
//! | 2 | physicalPrice             | uint256                       |
//! | 3 | version                   | uint256                       |
//! | 4 | supplier                  | address                       |
//! | 5 | availability              | uint8                         |
//! | 6 | maxPhysicalEditions       | uint256                       |
//! | 7 | currentPhysicalEditions   | uint256                       |
//! | 8 | currentDigitalEditions    | uint256                       |
//! | 9 | totalReservedSupply       | uint256                       |
//! |10 | childReferences           | (address,uint256,uint256)[]   |
//! |11 | uri                       | string                        |

use crate::abi::{Component, FunctionSpec, ParamType};

pub const SCHEMA_VERSION: u32 = 1;

/// Named fields of `ChildMetadata`.
pub mod child_fields {
    pub const MAX_PHYSICAL_EDITIONS: &str = "maxPhysicalEditions";
    pub const MAX_DIGITAL_EDITIONS: &str = "maxDigitalEditions";
    pub const CURRENT_DIGITAL_EDITIONS: &str = "currentDigitalEditions";
    pub const CURRENT_PHYSICAL_EDITIONS: &str = "currentPhysicalEditions";
    pub const TOTAL_RESERVED_SUPPLY: &str = "totalReservedSupply";
    pub const AVAILABILITY: &str = "availability";
    pub const FUTURES: &str = "futures";
    /// Position of `isFutures` inside the `futures` sub-struct.
    pub const FUTURES_IS_FUTURES_INDEX: usize = 3;
}

/// Output positions of `getTemplate`.
pub mod template_fields {
    pub const MAX_PHYSICAL_EDITIONS: usize = 6;
    pub const CURRENT_PHYSICAL_EDITIONS: usize = 7;
    pub const CURRENT_DIGITAL_EDITIONS: usize = 8;
    pub const TOTAL_RESERVED_SUPPLY: usize = 9;
    pub const CHILD_REFERENCES: usize = 10;

    /// Positions inside one `childReferences` entry.
    pub const REF_CHILD_CONTRACT: usize = 0;
    pub const REF_CHILD_ID: usize = 1;
    pub const REF_AMOUNT: usize = 2;
}

const UINT: ParamType = ParamType::Uint(256);

const ID_INPUT: &[Component] = &[Component::new("id", UINT)];

const FUTURES: &[Component] = &[
    Component::new("deadline", UINT),
    Component::new("maxDigitalEditions", UINT),
    Component::new("pricePerUnit", UINT),
    Component::new("isFutures", ParamType::Bool),
];

const CHILD_METADATA: &[Component] = &[
    Component::new("digitalPrice", UINT),
    Component::new("physicalPrice", UINT),
    Component::new("version", UINT),
    Component::new(child_fields::MAX_PHYSICAL_EDITIONS, UINT),
    Component::new(child_fields::MAX_DIGITAL_EDITIONS, UINT),
    Component::new(child_fields::CURRENT_DIGITAL_EDITIONS, UINT),
    Component::new(child_fields::CURRENT_PHYSICAL_EDITIONS, UINT),
    Component::new(child_fields::TOTAL_RESERVED_SUPPLY, UINT),
    Component::new("supplier", ParamType::Address),
    Component::new("status", ParamType::Uint(8)),
    Component::new(child_fields::AVAILABILITY, ParamType::Uint(8)),
    Component::new("uri", ParamType::String),
    Component::new(child_fields::FUTURES, ParamType::Tuple(FUTURES)),
];

const CHILD_REFERENCE: &[Component] = &[
    Component::new("childContract", ParamType::Address),
    Component::new("childId", UINT),
    Component::new("amount", UINT),
];

const TEMPLATE_OUTPUTS: &[Component] = &[
    Component::new("templateId", UINT),
    Component::new("digitalPrice", UINT),
    Component::new("physicalPrice", UINT),
    Component::new("version", UINT),
    Component::new("supplier", ParamType::Address),
    Component::new("availability", ParamType::Uint(8)),
    Component::new("maxPhysicalEditions", UINT),
    Component::new("currentPhysicalEditions", UINT),
    Component::new("currentDigitalEditions", UINT),
    Component::new("totalReservedSupply", UINT),
    Component::new(
        "childReferences",
        ParamType::Array(&ParamType::Tuple(CHILD_REFERENCE)),
    ),
    Component::new("uri", ParamType::String),
];

pub const CHILD_METADATA_FN: FunctionSpec = FunctionSpec {
    name: "getChildMetadata",
    inputs: ID_INPUT,
    outputs: &[Component::new("metadata", ParamType::Tuple(CHILD_METADATA))],
};

pub const TEMPLATE_FN: FunctionSpec = FunctionSpec {
    name: "getTemplate",
    inputs: ID_INPUT,
    outputs: TEMPLATE_OUTPUTS,
};
