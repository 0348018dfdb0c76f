/// ABI decoding error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// Data ended before a word at `offset` could be read.
    Truncated { offset: usize, len: usize },
    /// An offset or length word does not fit the buffer.
    OutOfRange(String),
    /// A word is not a valid encoding of the expected type.
    InvalidValue(String),
    InvalidHex(String),
}

impl std::fmt::Display for AbiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncated { offset, len } => {
                write!(f, "abi data truncated: need 32 bytes at offset {offset}, have {len}")
            }
            Self::OutOfRange(msg) => write!(f, "abi offset out of range: {msg}"),
            Self::InvalidValue(msg) => write!(f, "invalid abi value: {msg}"),
            Self::InvalidHex(msg) => write!(f, "invalid hex: {msg}"),
        }
    }
}

impl std::error::Error for AbiError {}
