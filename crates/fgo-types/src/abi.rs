//! Minimal Solidity ABI codec for the read calls the validator makes.
//!
//! Covers the types FGO contracts return from their metadata getters:
//! `uintN`, `address`, `bool`, `string`, `bytes`, dynamic arrays and tuples.
//! Tuples keep their component names so a decoded struct can be read both by
//! name and by position.

use alloy_primitives::{keccak256, Address, U256};

use crate::AbiError;

const WORD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Uint(usize),
    Address,
    Bool,
    String,
    Bytes,
    Array(&'static ParamType),
    Tuple(&'static [Component]),
}

impl ParamType {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String | Self::Bytes | Self::Array(_) => true,
            Self::Tuple(components) => components.iter().any(|c| c.kind.is_dynamic()),
            Self::Uint(_) | Self::Address | Self::Bool => false,
        }
    }

    /// Bytes this type occupies in the head of an enclosing tuple.
    fn head_size(&self) -> usize {
        match self {
            Self::Tuple(components) if !self.is_dynamic() => {
                components.iter().map(|c| c.kind.head_size()).sum()
            }
            _ => WORD,
        }
    }

    /// Canonical type string as used in function signatures.
    pub fn canonical(&self) -> String {
        match self {
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Address => "address".into(),
            Self::Bool => "bool".into(),
            Self::String => "string".into(),
            Self::Bytes => "bytes".into(),
            Self::Array(inner) => format!("{}[]", inner.canonical()),
            Self::Tuple(components) => format!("({})", canonical_list(components)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    pub kind: ParamType,
}

impl Component {
    pub const fn new(name: &'static str, kind: ParamType) -> Self {
        Self { name, kind }
    }
}

fn canonical_list(components: &[Component]) -> String {
    components
        .iter()
        .map(|c| c.kind.canonical())
        .collect::<Vec<_>>()
        .join(",")
}

/// A contract function's ABI: name, inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub inputs: &'static [Component],
    pub outputs: &'static [Component],
}

impl FunctionSpec {
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, canonical_list(self.inputs))
    }

    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }
}

/// A decoded ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256),
    Address(Address),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<AbiValue>),
    /// Components in declaration order, with their names (may be empty).
    Tuple(Vec<(String, AbiValue)>),
}

impl AbiValue {
    /// Tuple with named components.
    pub fn named<'a>(fields: impl IntoIterator<Item = (&'a str, AbiValue)>) -> Self {
        Self::Tuple(fields.into_iter().map(|(n, v)| (n.to_string(), v)).collect())
    }

    /// Tuple with unnamed components.
    pub fn tuple(values: impl IntoIterator<Item = AbiValue>) -> Self {
        Self::Tuple(values.into_iter().map(|v| (String::new(), v)).collect())
    }

    pub fn uint(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Positional access into a tuple or array.
    pub fn get(&self, index: usize) -> Option<&AbiValue> {
        match self {
            Self::Tuple(fields) => fields.get(index).map(|(_, v)| v),
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Named access into a tuple.
    pub fn field(&self, name: &str) -> Option<&AbiValue> {
        match self {
            Self::Tuple(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    fn is_dynamic(&self) -> bool {
        match self {
            Self::String(_) | Self::Bytes(_) | Self::Array(_) => true,
            Self::Tuple(fields) => fields.iter().any(|(_, v)| v.is_dynamic()),
            Self::Uint(_) | Self::Address(_) | Self::Bool(_) => false,
        }
    }

    fn head_size(&self) -> usize {
        match self {
            Self::Tuple(fields) if !self.is_dynamic() => {
                fields.iter().map(|(_, v)| v.head_size()).sum()
            }
            _ => WORD,
        }
    }
}

// --- Encoding ---

/// Encode `values` as the components of one tuple (e.g. call arguments).
pub fn encode(values: &[AbiValue]) -> Vec<u8> {
    encode_sequence(&values.iter().collect::<Vec<_>>())
}

/// Selector followed by the encoded arguments.
pub fn encode_call(spec: &FunctionSpec, args: &[AbiValue]) -> Vec<u8> {
    let mut out = spec.selector().to_vec();
    out.extend(encode(args));
    out
}

fn encode_sequence(values: &[&AbiValue]) -> Vec<u8> {
    let head_len: usize = values.iter().map(|v| v.head_size()).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for value in values {
        if value.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encode_value(value));
        } else {
            head.extend(encode_value(value));
        }
    }
    head.extend(tail);
    head
}

fn encode_value(value: &AbiValue) -> Vec<u8> {
    match value {
        AbiValue::Uint(v) => v.to_be_bytes::<32>().to_vec(),
        AbiValue::Address(a) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(a.as_slice());
            word.to_vec()
        }
        AbiValue::Bool(b) => usize_word(usize::from(*b)).to_vec(),
        AbiValue::String(s) => encode_bytes(s.as_bytes()),
        AbiValue::Bytes(b) => encode_bytes(b),
        AbiValue::Array(items) => {
            let mut out = usize_word(items.len()).to_vec();
            out.extend(encode_sequence(&items.iter().collect::<Vec<_>>()));
            out
        }
        AbiValue::Tuple(fields) => {
            encode_sequence(&fields.iter().map(|(_, v)| v).collect::<Vec<_>>())
        }
    }
}

fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend_from_slice(bytes);
    let padding = (WORD - bytes.len() % WORD) % WORD;
    out.extend(std::iter::repeat(0u8).take(padding));
    out
}

fn usize_word(n: usize) -> [u8; WORD] {
    U256::from(n).to_be_bytes::<32>()
}

// --- Decoding ---

/// Decode `0x`-prefixed (or bare) hex.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let s = s.trim();
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

/// Decode a function's return data. A single output is returned unwrapped;
/// several outputs come back as one positional tuple.
pub fn decode_output(spec: &FunctionSpec, data: &[u8]) -> Result<AbiValue, AbiError> {
    let mut fields = decode_tuple(spec.outputs, data, 0)?;
    if fields.len() == 1 {
        Ok(fields.remove(0).1)
    } else {
        Ok(AbiValue::Tuple(fields))
    }
}

/// Decode `data` as a tuple of `components`.
pub fn decode(components: &[Component], data: &[u8]) -> Result<AbiValue, AbiError> {
    decode_tuple(components, data, 0).map(AbiValue::Tuple)
}

fn decode_tuple(
    components: &[Component],
    data: &[u8],
    base: usize,
) -> Result<Vec<(String, AbiValue)>, AbiError> {
    let mut head = base;
    let mut out = Vec::with_capacity(components.len());
    for component in components {
        let value = if component.kind.is_dynamic() {
            let rel = read_usize(data, head)?;
            decode_value(&component.kind, data, offset(base, rel)?)?
        } else {
            decode_value(&component.kind, data, head)?
        };
        head = offset(head, component.kind.head_size())?;
        out.push((component.name.to_string(), value));
    }
    Ok(out)
}

fn decode_value(kind: &ParamType, data: &[u8], at: usize) -> Result<AbiValue, AbiError> {
    match kind {
        ParamType::Uint(bits) => {
            let value = U256::from_be_slice(read_word(data, at)?);
            if *bits < 256 && value.bit_len() > *bits {
                return Err(AbiError::InvalidValue(format!("{value} overflows uint{bits}")));
            }
            Ok(AbiValue::Uint(value))
        }
        ParamType::Address => {
            let word = read_word(data, at)?;
            if word[..12].iter().any(|b| *b != 0) {
                return Err(AbiError::InvalidValue("dirty high bytes in address".into()));
            }
            Ok(AbiValue::Address(Address::from_slice(&word[12..])))
        }
        ParamType::Bool => {
            let word = read_word(data, at)?;
            if word[..31].iter().any(|b| *b != 0) || word[31] > 1 {
                return Err(AbiError::InvalidValue("bool word is not 0 or 1".into()));
            }
            Ok(AbiValue::Bool(word[31] == 1))
        }
        ParamType::String => {
            let bytes = read_bytes(data, at)?;
            String::from_utf8(bytes.to_vec())
                .map(AbiValue::String)
                .map_err(|e| AbiError::InvalidValue(format!("string is not utf-8: {e}")))
        }
        ParamType::Bytes => Ok(AbiValue::Bytes(read_bytes(data, at)?.to_vec())),
        ParamType::Array(inner) => {
            let len = read_usize(data, at)?;
            let start = offset(at, WORD)?;
            // Every element needs at least one word; reject lengths the
            // buffer cannot possibly hold before allocating.
            if len > data.len().saturating_sub(start) / WORD {
                return Err(AbiError::OutOfRange(format!("array length {len} exceeds data")));
            }
            let mut items = Vec::with_capacity(len);
            for i in 0..len {
                let item = if inner.is_dynamic() {
                    let rel = read_usize(data, offset(start, i * WORD)?)?;
                    decode_value(inner, data, offset(start, rel)?)?
                } else {
                    decode_value(inner, data, offset(start, i * inner.head_size())?)?
                };
                items.push(item);
            }
            Ok(AbiValue::Array(items))
        }
        ParamType::Tuple(components) => decode_tuple(components, data, at).map(AbiValue::Tuple),
    }
}

fn offset(base: usize, rel: usize) -> Result<usize, AbiError> {
    base.checked_add(rel)
        .ok_or_else(|| AbiError::OutOfRange(format!("{base} + {rel} overflows")))
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8], AbiError> {
    let end = offset(at, WORD)?;
    data.get(at..end)
        .ok_or(AbiError::Truncated { offset: at, len: data.len() })
}

fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let word = read_word(data, at)?;
    if word[..24].iter().any(|b| *b != 0) {
        return Err(AbiError::OutOfRange(format!("offset/length word at {at} too large")));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low))
        .map_err(|_| AbiError::OutOfRange(format!("offset/length word at {at} too large")))
}

fn read_bytes(data: &[u8], at: usize) -> Result<&[u8], AbiError> {
    let len = read_usize(data, at)?;
    let start = offset(at, WORD)?;
    let end = offset(start, len)?;
    data.get(start..end)
        .ok_or_else(|| AbiError::OutOfRange(format!("{len} bytes at {start} exceed data")))
}
