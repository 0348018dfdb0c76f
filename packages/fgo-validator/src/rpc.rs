//! EVM JSON-RPC reader with primary → fallback routing and circuit breaker.
//!
//! Each `eth_call` goes to exactly one endpoint. Failures are reported, not
//! retried; repeated transport failures open the breaker so later calls use
//! the fallback until the primary has been quiet for the breaker window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use fgo_demand::{ChainReadError, ContractCall, ContractReader};
use fgo_types::abi::{self, AbiValue};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::metrics::METRICS;

const CIRCUIT_BREAKER_THRESHOLD: u64 = 5;
const CIRCUIT_BREAKER_WINDOW_MS: u64 = 30_000;

/// JSON-RPC code geth-style nodes use for reverts.
const EXECUTION_REVERTED: i64 = 3;

struct CircuitState {
    failures: u64,
    last_failure_ms: u64,
    open: bool,
}

pub struct RpcClient {
    http: reqwest::Client,
    primary_url: String,
    fallback_url: String,
    circuit: Mutex<CircuitState>,
    total_failovers: AtomicU64,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl RpcClient {
    pub fn new(
        primary_url: &str,
        fallback_url: &str,
        timeout: Duration,
    ) -> Result<Self, crate::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::Error::Rpc(format!("cannot build HTTP client: {e}")))?;
        info!(
            primary = primary_url,
            fallback = fallback_url,
            "RPC client initialized with failover"
        );
        Ok(Self {
            http,
            primary_url: primary_url.to_string(),
            fallback_url: fallback_url.to_string(),
            circuit: Mutex::new(CircuitState {
                failures: 0,
                last_failure_ms: 0,
                open: false,
            }),
            total_failovers: AtomicU64::new(0),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn primary_url(&self) -> &str {
        &self.primary_url
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    // --- Calls ---

    /// `eth_call` at `latest` against the active endpoint. Returns raw
    /// return data.
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, ChainReadError> {
        let params = json!([
            { "to": format!("{to:#x}"), "data": format!("0x{}", hex::encode(data)) },
            "latest"
        ]);
        let url = self.active_url().to_string();
        match self.request(&url, "eth_call", params).await {
            Ok(result) => {
                self.record_success();
                parse_call_result(result)
            }
            Err(e @ ChainReadError::Transport(_)) => {
                self.record_failure(&url);
                warn!(rpc = %url, error = %e, "eth_call transport failure");
                Err(e)
            }
            Err(e) => {
                // The node answered; a revert says nothing about its health.
                self.record_success();
                Err(e)
            }
        }
    }

    /// Quick connectivity check. Returns "ok", "degraded", or error.
    pub async fn health_check(&self) -> Result<&'static str, crate::Error> {
        match self.request(&self.primary_url, "eth_blockNumber", json!([])).await {
            Ok(_) => Ok("ok"),
            Err(_) => match self.request(&self.fallback_url, "eth_blockNumber", json!([])).await {
                Ok(_) => Ok("degraded"),
                Err(e) => Err(crate::Error::Rpc(format!("Both RPCs unreachable: {e}"))),
            },
        }
    }

    async fn request(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, ChainReadError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        debug!(rpc = %url, method, id, "JSON-RPC request");

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainReadError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainReadError::Transport(format!("HTTP {status} from {url}")));
        }
        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ChainReadError::Malformed(format!("invalid JSON-RPC body: {e}")))?;
        into_result(parsed)
    }

    // --- Failover / circuit breaker ---

    fn record_success(&self) {
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        if circuit.failures > 0 && !circuit.open {
            info!(primary = %self.primary_url, "Primary RPC recovered");
            circuit.failures = 0;
        }
    }

    /// Only failures against the primary move the breaker; the fallback is
    /// where traffic goes while it is open.
    fn record_failure(&self, url: &str) {
        METRICS.rpc_errors.fetch_add(1, Ordering::Relaxed);
        if url != self.primary_url {
            return;
        }
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        circuit.failures += 1;
        circuit.last_failure_ms = now_ms();
        if circuit.failures >= CIRCUIT_BREAKER_THRESHOLD && !circuit.open {
            circuit.open = true;
            self.total_failovers.fetch_add(1, Ordering::Relaxed);
            METRICS.rpc_failovers.fetch_add(1, Ordering::Relaxed);
            warn!(
                failures = circuit.failures,
                fallback = %self.fallback_url,
                "Circuit breaker opened, routing to fallback"
            );
        }
    }

    pub fn is_circuit_open(&self) -> bool {
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        if !circuit.open {
            return false;
        }
        if now_ms().saturating_sub(circuit.last_failure_ms) > CIRCUIT_BREAKER_WINDOW_MS {
            circuit.open = false;
            circuit.failures = 0;
            info!(primary = %self.primary_url, "Circuit breaker half-open, retrying primary");
            return false;
        }
        true
    }

    pub fn failover_count(&self) -> u64 {
        self.total_failovers.load(Ordering::Relaxed)
    }

    /// Currently active RPC URL.
    pub fn active_url(&self) -> &str {
        if self.is_circuit_open() {
            &self.fallback_url
        } else {
            &self.primary_url
        }
    }
}

#[async_trait]
impl ContractReader for RpcClient {
    async fn read_contract(&self, call: ContractCall) -> Result<AbiValue, ChainReadError> {
        let data = abi::encode_call(&call.function, &call.args);
        let output = self.eth_call(call.address, &data).await?;
        Ok(abi::decode_output(&call.function, &output)?)
    }
}

fn into_result(response: JsonRpcResponse) -> Result<Value, ChainReadError> {
    if let Some(err) = response.error {
        let is_revert = err.code == EXECUTION_REVERTED || err.message.contains("revert");
        let detail = match err.data {
            Some(Value::String(data)) => format!("{} ({data})", err.message),
            _ => err.message,
        };
        return Err(if is_revert {
            ChainReadError::Reverted(detail)
        } else {
            ChainReadError::Transport(format!("rpc error {}: {detail}", err.code))
        });
    }
    response
        .result
        .ok_or_else(|| ChainReadError::Malformed("response has neither result nor error".into()))
}

fn parse_call_result(result: Value) -> Result<Vec<u8>, ChainReadError> {
    let hex = result
        .as_str()
        .ok_or_else(|| ChainReadError::Malformed(format!("eth_call result is not a string: {result}")))?;
    let bytes = abi::decode_hex(hex)?;
    if bytes.is_empty() {
        // Calls to an address without code succeed with empty data.
        return Err(ChainReadError::Reverted("empty return data".into()));
    }
    Ok(bytes)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
