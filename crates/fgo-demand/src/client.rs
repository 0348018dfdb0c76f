//! Collaborator seams. The HTTP service plugs in JSON-RPC and subgraph
//! clients; tests plug in mocks or the in-memory doubles from [`crate::memory`].

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use fgo_types::abi::{AbiValue, FunctionSpec};
use fgo_types::UserCredits;

use crate::error::{ChainReadError, CreditsLookupError};

/// One read-only contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub address: Address,
    pub function: FunctionSpec,
    pub args: Vec<AbiValue>,
}

impl ContractCall {
    pub fn new(address: Address, function: FunctionSpec, args: Vec<AbiValue>) -> Self {
        Self { address, function, args }
    }

    /// Single `uint256` id argument, the shape of every FGO getter.
    pub fn by_id(address: Address, function: FunctionSpec, id: U256) -> Self {
        Self::new(address, function, vec![AbiValue::Uint(id)])
    }

    pub fn id_arg(&self) -> Option<U256> {
        self.args.first().and_then(AbiValue::as_uint)
    }
}

/// Reads contract state. Implementations return the decoded outputs of
/// `call.function`; a single output comes back unwrapped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn read_contract(&self, call: ContractCall) -> Result<AbiValue, ChainReadError>;
}

/// Fetches a user's futures-credit ledger. `Ok(None)` means the user has
/// never held credits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditsLookup: Send + Sync {
    async fn user_credits(&self, user: Address)
        -> Result<Option<UserCredits>, CreditsLookupError>;
}
