//! In-memory collaborators for tests and local tooling.
//!
//! [`InMemoryChain`] answers contract reads from a table keyed by
//! `(contract, function, id)` and records every call it sees, so tests can
//! assert how many reads a validation made and in what order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use fgo_types::abi::{AbiValue, FunctionSpec};
use fgo_types::schema::{child_fields, CHILD_METADATA_FN, TEMPLATE_FN};
use fgo_types::{ChildSupplySnapshot, TemplateSupplySnapshot, UserCredits};

use crate::client::{ContractCall, ContractReader, CreditsLookup};
use crate::error::{ChainReadError, CreditsLookupError};

type CallKey = (Address, &'static str, U256);

#[derive(Default)]
pub struct InMemoryChain {
    responses: HashMap<CallKey, Result<AbiValue, ChainReadError>>,
    calls: Mutex<Vec<ContractCall>>,
}

impl InMemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(self, contract: Address, id: U256, snapshot: &ChildSupplySnapshot) -> Self {
        self.with_value(contract, CHILD_METADATA_FN, id, child_metadata_value(snapshot))
    }

    pub fn with_template(
        self,
        contract: Address,
        id: U256,
        snapshot: &TemplateSupplySnapshot,
    ) -> Self {
        self.with_value(contract, TEMPLATE_FN, id, template_value(snapshot))
    }

    /// Serve `value` verbatim for `function(id)` on `contract`.
    pub fn with_value(
        mut self,
        contract: Address,
        function: FunctionSpec,
        id: U256,
        value: AbiValue,
    ) -> Self {
        self.responses.insert((contract, function.name, id), Ok(value));
        self
    }

    pub fn with_failure(
        mut self,
        contract: Address,
        function: FunctionSpec,
        id: U256,
        error: ChainReadError,
    ) -> Self {
        self.responses.insert((contract, function.name, id), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ContractReader for InMemoryChain {
    async fn read_contract(&self, call: ContractCall) -> Result<AbiValue, ChainReadError> {
        let id = call.id_arg().unwrap_or_default();
        let key = (call.address, call.function.name, id);
        let name = call.function.name;
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
        self.responses.get(&key).cloned().unwrap_or_else(|| {
            Err(ChainReadError::Reverted(format!("{name}({id}) has no entry at {}", key.0)))
        })
    }
}

#[derive(Default)]
pub struct InMemoryCredits {
    ledgers: HashMap<Address, UserCredits>,
    failure: Option<CreditsLookupError>,
    lookups: AtomicUsize,
}

impl InMemoryCredits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(mut self, ledger: UserCredits) -> Self {
        self.ledgers.insert(ledger.address, ledger);
        self
    }

    /// Every lookup fails with `error`.
    pub fn failing(error: CreditsLookupError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CreditsLookup for InMemoryCredits {
    async fn user_credits(
        &self,
        user: Address,
    ) -> Result<Option<UserCredits>, CreditsLookupError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.ledgers.get(&user).cloned()),
        }
    }
}

// --- Value builders ---

/// Full `ChildMetadata` struct as `getChildMetadata` returns it. Fields the
/// validator ignores are zeroed.
pub fn child_metadata_value(snapshot: &ChildSupplySnapshot) -> AbiValue {
    let futures = AbiValue::named([
        ("deadline", AbiValue::uint(0)),
        ("maxDigitalEditions", AbiValue::uint(0)),
        ("pricePerUnit", AbiValue::uint(0)),
        ("isFutures", AbiValue::Bool(snapshot.is_futures)),
    ]);
    AbiValue::named([
        ("digitalPrice", AbiValue::uint(0)),
        ("physicalPrice", AbiValue::uint(0)),
        ("version", AbiValue::uint(1)),
        (child_fields::MAX_PHYSICAL_EDITIONS, AbiValue::Uint(snapshot.max_physical_editions)),
        (child_fields::MAX_DIGITAL_EDITIONS, AbiValue::Uint(snapshot.max_digital_editions)),
        (child_fields::CURRENT_DIGITAL_EDITIONS, AbiValue::Uint(snapshot.current_digital_editions)),
        (
            child_fields::CURRENT_PHYSICAL_EDITIONS,
            AbiValue::Uint(snapshot.current_physical_editions),
        ),
        (child_fields::TOTAL_RESERVED_SUPPLY, AbiValue::Uint(snapshot.total_reserved_supply)),
        ("supplier", AbiValue::Address(Address::ZERO)),
        ("status", AbiValue::uint(0)),
        (child_fields::AVAILABILITY, AbiValue::uint(u8::from(snapshot.availability).into())),
        ("uri", AbiValue::String(String::new())),
        (child_fields::FUTURES, futures),
    ])
}

/// The twelve positional outputs of `getTemplate`.
pub fn template_value(snapshot: &TemplateSupplySnapshot) -> AbiValue {
    let refs = snapshot
        .child_references
        .iter()
        .map(|r| {
            AbiValue::named([
                ("childContract", AbiValue::Address(r.child_contract)),
                ("childId", AbiValue::Uint(r.child_id)),
                ("amount", AbiValue::Uint(r.amount)),
            ])
        })
        .collect();
    let values = [
        AbiValue::uint(0),
        AbiValue::uint(0),
        AbiValue::uint(0),
        AbiValue::uint(1),
        AbiValue::Address(Address::ZERO),
        AbiValue::uint(0),
        AbiValue::Uint(snapshot.max_physical_editions),
        AbiValue::Uint(snapshot.current_physical_editions),
        AbiValue::Uint(snapshot.current_digital_editions),
        AbiValue::Uint(snapshot.total_reserved_supply),
        AbiValue::Array(refs),
        AbiValue::String(String::new()),
    ];
    AbiValue::named(TEMPLATE_FN.outputs.iter().map(|c| c.name).zip(values))
}
