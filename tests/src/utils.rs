use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fgo_demand::memory::{InMemoryChain, InMemoryCredits};
use fgo_demand::{ChainReadError, ContractCall, ContractReader, DemandValidator};
use fgo_types::abi::{self, AbiValue, FunctionSpec};
use fgo_types::{
    Availability, ChildSupplySnapshot, FutureCredit, TemplateChildReference,
    TemplateSupplySnapshot, UserCredits,
};
use fgo_validator::{create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

pub const CHILDREN: Address = Address::repeat_byte(0xc1);
pub const TEMPLATES: Address = Address::repeat_byte(0x7e);
pub const USER: Address = Address::repeat_byte(0xab);

pub fn u(n: u64) -> U256 {
    U256::from(n)
}

// --- Snapshots ---

pub fn child(availability: Availability) -> ChildSupplySnapshot {
    ChildSupplySnapshot { availability, ..Default::default() }
}

pub fn digital_child(max: u64, current: u64) -> ChildSupplySnapshot {
    ChildSupplySnapshot {
        max_digital_editions: u(max),
        current_digital_editions: u(current),
        ..child(Availability::Both)
    }
}

pub fn physical_child(max: u64, current: u64, reserved: u64) -> ChildSupplySnapshot {
    ChildSupplySnapshot {
        max_physical_editions: u(max),
        current_physical_editions: u(current),
        total_reserved_supply: u(reserved),
        ..child(Availability::Both)
    }
}

pub fn futures_child() -> ChildSupplySnapshot {
    ChildSupplySnapshot { is_futures: true, ..child(Availability::Both) }
}

pub fn template(max_physical: u64, refs: &[(u64, u64)]) -> TemplateSupplySnapshot {
    TemplateSupplySnapshot {
        max_physical_editions: u(max_physical),
        child_references: refs
            .iter()
            .map(|&(id, amount)| TemplateChildReference {
                child_contract: CHILDREN,
                child_id: u(id),
                amount: u(amount),
            })
            .collect(),
        ..Default::default()
    }
}

pub fn ledger(entries: &[(u64, u64, u64)]) -> UserCredits {
    UserCredits {
        address: USER,
        future_credits: entries
            .iter()
            .map(|&(id, credits, consumed)| FutureCredit {
                child_contract: CHILDREN,
                child_id: u(id),
                credits: u(credits),
                consumed: u(consumed),
            })
            .collect(),
    }
}

pub fn validator(chain: Arc<InMemoryChain>, credits: Arc<InMemoryCredits>) -> DemandValidator {
    DemandValidator::new(chain, credits)
}

// --- Wire-level reader ---

/// Serves the same state as an [`InMemoryChain`], but pushes every call and
/// answer through the ABI codec the way an `eth_call` would.
pub struct EncodedChain {
    inner: InMemoryChain,
    bytes_served: AtomicUsize,
}

impl EncodedChain {
    pub fn new(inner: InMemoryChain) -> Self {
        Self { inner, bytes_served: AtomicUsize::new(0) }
    }

    pub fn bytes_served(&self) -> usize {
        self.bytes_served.load(Ordering::Relaxed)
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.inner.calls()
    }
}

#[async_trait]
impl ContractReader for EncodedChain {
    async fn read_contract(&self, call: ContractCall) -> Result<AbiValue, ChainReadError> {
        let calldata = abi::encode_call(&call.function, &call.args);
        assert_eq!(calldata[..4], call.function.selector());
        let function = call.function;
        let value = self.inner.read_contract(call).await?;
        let data = return_data(&function, value);
        self.bytes_served.fetch_add(data.len(), Ordering::Relaxed);
        Ok(abi::decode_output(&function, &data)?)
    }
}

/// Raw return data for `value`, as a node would send it back.
pub fn return_data(function: &FunctionSpec, value: AbiValue) -> Vec<u8> {
    match value {
        AbiValue::Tuple(fields) if function.outputs.len() > 1 => {
            abi::encode(&fields.into_iter().map(|(_, v)| v).collect::<Vec<_>>())
        }
        single => abi::encode(&[single]),
    }
}

// --- HTTP ---

pub fn app(chain: InMemoryChain, credits: InMemoryCredits) -> Result<Router> {
    let state = AppState::with_collaborators(Config::default(), Arc::new(chain), Arc::new(credits))?;
    Ok(create_router(Arc::new(state)))
}

pub async fn post_json(router: Router, path: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    send(router, request).await
}

pub async fn get(router: Router, path: &str) -> Result<(StatusCode, String)> {
    let request = Request::builder().uri(path).body(Body::empty())?;
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

pub async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}
