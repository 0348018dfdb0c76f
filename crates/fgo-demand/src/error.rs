//! Collaborator failures. Both are recovered inside the validators and turned
//! into diagnostic strings; neither reaches the caller as an `Err`.

use fgo_types::AbiError;

/// Failure reading on-chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainReadError {
    /// Network unreachable, HTTP failure, JSON-RPC transport error.
    Transport(String),
    /// The call executed and reverted.
    Reverted(String),
    /// The response could not be decoded into the expected shape.
    Malformed(String),
}

impl std::fmt::Display for ChainReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "network error: {msg}"),
            Self::Reverted(msg) => write!(f, "execution reverted: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ChainReadError {}

impl From<AbiError> for ChainReadError {
    fn from(err: AbiError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Failure fetching a user's futures-credit ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditsLookupError {
    Transport(String),
    Malformed(String),
}

impl std::fmt::Display for CreditsLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "credits lookup failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed credits response: {msg}"),
        }
    }
}

impl std::error::Error for CreditsLookupError {}
