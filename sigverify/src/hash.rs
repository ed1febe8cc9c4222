use alloy_dyn_abi::TypedData;
use alloy_primitives::{keccak256, B256};

use crate::error::VerifyError;

/// Prefix for UniPass personal messages.
pub const UNIPASS_MESSAGE_PREFIX: &str = "\x18UniPass Signed Message:\n";
/// Prefix for EIP-191 personal messages.
pub const EIP191_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Domain-separation scheme applied when hashing a raw message.
///
/// The two prefixes are byte-distinct, so a signature produced under one
/// scheme can never replay as a valid signature under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagePrefix {
    /// `"\x18UniPass Signed Message:\n"` (the default used by UniPass wallets).
    #[default]
    Unipass,
    /// `"\x19Ethereum Signed Message:\n"` per EIP-191.
    Eip191,
}

impl MessagePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagePrefix::Unipass => UNIPASS_MESSAGE_PREFIX,
            MessagePrefix::Eip191 => EIP191_MESSAGE_PREFIX,
        }
    }
}

/// Hash a raw message for signing:
/// `keccak256(prefix || ascii-decimal(message.len()) || message)`.
///
/// The decimal length makes the construction length-prefixed, so a signature
/// over a short message cannot replay against a longer message sharing the
/// same byte prefix.
pub fn hash_message(message: &[u8], prefix: MessagePrefix) -> B256 {
    let header = format!("{}{}", prefix.as_str(), message.len());
    keccak256([header.as_bytes(), message].concat())
}

/// Compute the EIP-712 signing digest of a typed-data payload:
/// `keccak256("\x19\x01" || domainSeparator || hashStruct(message))`.
///
/// Canonicalization is delegated to `alloy_dyn_abi`; its errors are surfaced
/// unchanged. The personal-message prefixes above never apply on this path.
pub fn hash_typed_data(data: &TypedData) -> Result<B256, VerifyError> {
    Ok(data.eip712_signing_hash()?)
}
