//! Builder of the RPC client used by the scripts

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    node_bindings::{Anvil, AnvilInstance},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use reqwest::Url;
use tracing::info;

use crate::errors::ScriptError;

/// An alloy provider over HTTP, with the recommended fillers and, when a
/// private key is given, a local wallet signing the transactions
pub type RpcProvider = DynProvider<Ethereum>;

/// The RPC provider along with the account of its local wallet, if any
#[derive(Clone)]
pub struct RpcClient {
    /// Provider used for every call
    pub provider: RpcProvider,
    /// Address of the local signer, `None` when the node signs
    pub local_signer: Option<Address>,
}

/// Build the RPC client for the given endpoint.
///
/// Without a private key, transactions are sent unsigned and signed by the
/// node, which only works against nodes managing their own accounts.
pub fn create_rpc_provider(
    rpc_url: Url,
    priv_key: Option<&str>,
) -> Result<RpcClient, ScriptError> {
    let Some(priv_key) = priv_key else {
        info!("No private key set, using the node accounts");
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        return Ok(RpcClient {
            provider,
            local_signer: None,
        });
    };

    // Create our signer
    let signer = priv_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    Ok(create_signer_provider(rpc_url, signer))
}

/// Build the RPC client for the given endpoint, signing with `signer`
pub fn create_signer_provider(rpc_url: Url, signer: PrivateKeySigner) -> RpcClient {
    let local_signer = signer.address();

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url)
        .erased();

    RpcClient {
        provider,
        local_signer: Some(local_signer),
    }
}

/// Spawn an in-memory Anvil node, killed once the instance is dropped
pub fn spawn_ephemeral_node() -> Result<AnvilInstance, ScriptError> {
    let node = Anvil::new()
        .try_spawn()
        .map_err(|e| ScriptError::ClientInitialization(format!("spawning anvil: {}", e)))?;
    info!("Spawned an ephemeral node at {}", node.endpoint());

    Ok(node)
}

/// Build the RPC client of a spawned node.
///
/// The configured private key wins, otherwise the first dev account signs.
pub fn create_node_provider(
    node: &AnvilInstance,
    priv_key: Option<&str>,
) -> Result<RpcClient, ScriptError> {
    if priv_key.is_some() {
        return create_rpc_provider(node.endpoint_url(), priv_key);
    }

    let key = node.keys().first().ok_or_else(|| {
        ScriptError::SignerUnavailable(String::from("the ephemeral node has no dev account"))
    })?;

    let signer: PrivateKeySigner = key.clone().into();

    Ok(create_signer_provider(node.endpoint_url(), signer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    /// First well known development account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn local_key_becomes_the_signer() {
        let client = create_rpc_provider(
            "http://127.0.0.1:8545".parse().unwrap(),
            Some(DEV_KEY),
        )
        .unwrap();

        assert_eq!(
            client.local_signer,
            Some(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
        );
    }

    #[test]
    fn no_key_defers_to_the_node() {
        let client = create_rpc_provider("http://127.0.0.1:8545".parse().unwrap(), None).unwrap();
        assert!(client.local_signer.is_none());
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = create_rpc_provider("http://127.0.0.1:8545".parse().unwrap(), Some("0x1234"))
            .err()
            .unwrap();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
    }
}
