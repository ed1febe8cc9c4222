//! Signature verification for Ethereum accounts, covering both EOA accounts
//! (ECDSA public-key recovery) and contract accounts (EIP-1271
//! `isValidSignature` calls against a caller-supplied RPC client).

pub mod contract;
pub mod error;
pub mod hash;
pub mod recover;

pub use contract::{verify_via_contract, CallClient, ERC1271_MAGIC_VALUE};
pub use error::VerifyError;
pub use hash::{
    hash_message, hash_typed_data, MessagePrefix, EIP191_MESSAGE_PREFIX, UNIPASS_MESSAGE_PREFIX,
};
pub use recover::{try_recover, ECDSA_SIGNATURE_LENGTH};

use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256};

/// Verify a signature over an already-computed digest.
///
/// Local recovery gets first refusal: a 65-byte signature that recovers to
/// `account` succeeds with no network traffic. When recovery does not prove
/// authorship (address mismatch, or the signature is not 65 bytes) the check
/// falls through to the EIP-1271 contract call, so `client` decides whether
/// contract accounts can succeed at all. A structurally malformed 65-byte
/// signature propagates as an error rather than falling through.
///
/// `Ok(false)` means verification completed and the signature is invalid;
/// every other failure is a [`VerifyError`], including
/// [`VerifyError::NoVerificationBackend`] when no client was supplied and
/// recovery failed.
pub async fn verify_signature(
    account: Address,
    digest: B256,
    signature: &[u8],
    client: Option<&dyn CallClient>,
) -> Result<bool, VerifyError> {
    if try_recover(&digest, signature, account)? == Some(true) {
        return Ok(true);
    }
    match client {
        Some(client) => verify_via_contract(digest, signature, account, client).await,
        None => Err(VerifyError::NoVerificationBackend),
    }
}

/// Verify a signature over a raw message, hashed under the chosen
/// domain-separation prefix.
pub async fn verify_message_signature(
    account: Address,
    message: &[u8],
    signature: &[u8],
    prefix: MessagePrefix,
    client: Option<&dyn CallClient>,
) -> Result<bool, VerifyError> {
    let digest = hash_message(message, prefix);
    verify_signature(account, digest, signature, client).await
}

/// Verify a signature over an EIP-712 typed-data payload.
pub async fn verify_typed_data_signature(
    account: Address,
    data: &TypedData,
    signature: &[u8],
    client: Option<&dyn CallClient>,
) -> Result<bool, VerifyError> {
    let digest = hash_typed_data(data)?;
    verify_signature(account, digest, signature, client).await
}
