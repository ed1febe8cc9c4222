use alloy_primitives::{fixed_bytes, Address, Bytes, FixedBytes, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockId, TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use alloy_transport::TransportResult;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::VerifyError;

sol! {
    /// EIP-1271 standard signature validation interface.
    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
    }
}

/// `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`: the value a
/// contract returns to accept a signature, which per EIP-1271 is also the
/// selector of the method itself.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> = fixed_bytes!("0x1626ba7e");

/// Read-only access to chain state, the one capability the remote verifier
/// needs. Blanket-implemented for every [`alloy_provider::Provider`], so any
/// pooled HTTP/WS provider owned by the caller can be passed in directly.
///
/// Mocked in tests with canned responses; no live endpoint required.
pub trait CallClient: Send + Sync {
    /// Execute an `eth_call` of `input` against `to` at `block`, returning
    /// the raw result bytes. Must be safe for concurrent in-flight calls.
    fn call_contract(
        &self,
        to: Address,
        input: Bytes,
        block: BlockId,
    ) -> BoxFuture<'_, TransportResult<Bytes>>;
}

impl<P: Provider> CallClient for P {
    fn call_contract(
        &self,
        to: Address,
        input: Bytes,
        block: BlockId,
    ) -> BoxFuture<'_, TransportResult<Bytes>> {
        let tx = TransactionRequest::default()
            .to(to)
            .input(TransactionInput::new(input));
        Box::pin(async move { self.call(tx).block(block).await })
    }
}

/// Ask the contract deployed at `account` whether it accepts `signature`
/// over `digest`, via the EIP-1271 `isValidSignature` view method.
///
/// The call mutates no state and is free to retry. Only the exact magic
/// return value counts as acceptance; any other payload (empty included) is
/// a rejection, not an error. Transport failures propagate as
/// [`VerifyError::Transport`] and are never coerced to `false`.
pub async fn verify_via_contract(
    digest: B256,
    signature: &[u8],
    account: Address,
    client: &dyn CallClient,
) -> Result<bool, VerifyError> {
    let call = IERC1271::isValidSignatureCall {
        hash: digest,
        signature: Bytes::copy_from_slice(signature),
    };
    debug!(account = %account, digest = %digest, "calling isValidSignature");
    let ret = client
        .call_contract(account, call.abi_encode().into(), BlockId::latest())
        .await?;
    let accepted = IERC1271::isValidSignatureCall::abi_decode_returns(&ret)
        .map(|magic| magic == ERC1271_MAGIC_VALUE)
        .unwrap_or(false);
    debug!(account = %account, accepted, "isValidSignature returned");
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;
    use alloy_transport::TransportErrorKind;
    use std::sync::Mutex;

    /// Canned `eth_call` responses, recording the calldata it was given.
    struct CannedClient {
        response: Result<Bytes, String>,
        seen: Mutex<Option<(Address, Bytes)>>,
    }

    impl CannedClient {
        fn returning(response: Bytes) -> Self {
            Self { response: Ok(response), seen: Mutex::new(None) }
        }

        fn failing(message: &str) -> Self {
            Self { response: Err(message.to_owned()), seen: Mutex::new(None) }
        }
    }

    impl CallClient for CannedClient {
        fn call_contract(
            &self,
            to: Address,
            input: Bytes,
            _block: BlockId,
        ) -> BoxFuture<'_, TransportResult<Bytes>> {
            *self.seen.lock().unwrap() = Some((to, input));
            let response = self.response.clone();
            Box::pin(async move { response.map_err(|m| TransportErrorKind::custom_str(&m)) })
        }
    }

    fn accept_word() -> Bytes {
        ERC1271_MAGIC_VALUE.abi_encode().into()
    }

    #[test]
    fn magic_value_is_the_method_selector() {
        assert_eq!(IERC1271::isValidSignatureCall::SELECTOR, ERC1271_MAGIC_VALUE.0);
    }

    #[tokio::test]
    async fn magic_return_accepts() {
        let client = CannedClient::returning(accept_word());
        let digest = B256::repeat_byte(0x11);
        let account = Address::repeat_byte(0x22);
        let ok = verify_via_contract(digest, &[0xab; 140], account, &client)
            .await
            .unwrap();
        assert!(ok);

        // The calldata must carry the digest and the opaque blob unchanged.
        let (to, input) = client.seen.into_inner().unwrap().unwrap();
        assert_eq!(to, account);
        let decoded = IERC1271::isValidSignatureCall::abi_decode(&input).unwrap();
        assert_eq!(decoded.hash, digest);
        assert_eq!(decoded.signature.as_ref(), &[0xab; 140][..]);
    }

    #[tokio::test]
    async fn other_returns_reject_without_error() {
        for ret in [
            Bytes::new(),
            Bytes::from_static(&[0u8; 32]),
            FixedBytes::<4>::from([0xde, 0xad, 0xbe, 0xef]).abi_encode().into(),
            Bytes::from_static(&[0xff; 7]),
        ] {
            let client = CannedClient::returning(ret);
            let ok = verify_via_contract(
                B256::repeat_byte(0x11),
                &[0xab; 140],
                Address::repeat_byte(0x22),
                &client,
            )
            .await
            .unwrap();
            assert!(!ok);
        }
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let client = CannedClient::failing("connection refused");
        let err = verify_via_contract(
            B256::repeat_byte(0x11),
            &[0xab; 140],
            Address::repeat_byte(0x22),
            &client,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, VerifyError::Transport(_)));
    }
}
