use alloy_primitives::{Address, Signature, B256};

use crate::error::VerifyError;

/// Byte length of a raw ECDSA signature: 32-byte r, 32-byte s, 1-byte v.
pub const ECDSA_SIGNATURE_LENGTH: usize = 65;

/// Attempt EOA verification by public-key recovery.
///
/// Returns `None` when `signature` is not exactly 65 bytes; such blobs are
/// contract-wallet material and never attempted here. Otherwise recovers the
/// signer from `(digest, signature)` and reports whether the derived address
/// equals `account`.
///
/// A 65-byte signature that fails structural decoding (recovery id outside
/// the accepted range, r/s not a valid scalar, recovered point not on the
/// curve) is a [`VerifyError::MalformedSignature`], distinct from the
/// `Some(false)` address mismatch.
pub fn try_recover(
    digest: &B256,
    signature: &[u8],
    account: Address,
) -> Result<Option<bool>, VerifyError> {
    if signature.len() != ECDSA_SIGNATURE_LENGTH {
        return Ok(None);
    }
    let signature = Signature::from_raw(signature)?;
    let recovered = signature.recover_address_from_prehash(digest)?;
    Ok(Some(recovered == account))
}
