use alloy_primitives::SignatureError;
use alloy_transport::TransportError;
use thiserror::Error;

/// Failure modes of a verification attempt.
///
/// A `false` verification result is reserved for "verification ran to
/// completion and the signature is invalid"; every condition below is an
/// error instead, returned to the caller and never logged-and-swallowed.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A 65-byte signature failed structural ECDSA decoding or recovery
    /// (bad recovery id, r/s out of range, point not on curve).
    #[error("malformed signature: {0}")]
    MalformedSignature(#[from] SignatureError),

    /// Typed-data canonicalization or ABI handling failed.
    #[error("encoding failed: {0}")]
    Encoding(#[from] alloy_dyn_abi::Error),

    /// The contract call could not be executed: RPC transport failure,
    /// timeout, or cancellation. Safe for the caller to retry.
    #[error("contract call failed: {0}")]
    Transport(#[from] TransportError),

    /// Local recovery did not prove authorship and no query client was
    /// supplied, so there is no remaining verification path.
    #[error("no verification backend available")]
    NoVerificationBackend,
}
