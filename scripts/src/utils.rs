//! Utilities for the deploy scripts.

use reqwest::Url;

use crate::{
    constants::{DEFAULT_RPC, EPHEMERAL_NETWORK, LOCALHOST_NETWORK},
    errors::ScriptError,
};

/// Where the node of the selected network lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// An in-memory node spawned for this run only
    Ephemeral,
    /// A node reachable over HTTP
    Rpc(Url),
}

/// Resolve the endpoint of the given network.
///
/// An explicit `rpc_url` always wins. Otherwise the ephemeral network gets a
/// node of its own and `localhost` uses the local node.
pub fn resolve_endpoint(network: &str, rpc_url: Option<&str>) -> Result<Endpoint, ScriptError> {
    let raw_url = match rpc_url {
        Some(url) => url,
        None if network == EPHEMERAL_NETWORK => return Ok(Endpoint::Ephemeral),
        None if network == LOCALHOST_NETWORK => DEFAULT_RPC,
        None => {
            return Err(ScriptError::ClientInitialization(format!(
                "unknown network '{}', provide an RPC url for it",
                network
            )))
        }
    };

    raw_url
        .parse::<Url>()
        .map(Endpoint::Rpc)
        .map_err(|e| ScriptError::ClientInitialization(format!("{}: {}", raw_url, e)))
}

/// Whether the network is wiped once the script exits
pub fn is_ephemeral_network(network: &str) -> bool {
    network == EPHEMERAL_NETWORK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardhat_gets_its_own_node() {
        assert_eq!(resolve_endpoint("hardhat", None).unwrap(), Endpoint::Ephemeral);
    }

    #[test]
    fn localhost_uses_the_local_node() {
        let Endpoint::Rpc(url) = resolve_endpoint("localhost", None).unwrap() else {
            panic!("localhost should resolve to an RPC url");
        };
        assert_eq!(url.as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn explicit_url_overrides_the_network_default() {
        for network in ["hardhat", "localhost"] {
            assert_eq!(
                resolve_endpoint(network, Some("http://10.0.0.2:9545")).unwrap(),
                Endpoint::Rpc("http://10.0.0.2:9545".parse().unwrap())
            );
        }
    }

    #[test]
    fn unknown_network_needs_an_url() {
        let err = resolve_endpoint("sepolia", None).unwrap_err();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));

        assert!(resolve_endpoint("sepolia", Some("https://rpc.sepolia.org")).is_ok());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = resolve_endpoint("localhost", Some("not an url")).unwrap_err();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
    }

    #[test]
    fn only_hardhat_is_ephemeral() {
        assert!(is_ephemeral_network("hardhat"));
        assert!(!is_ephemeral_network("localhost"));
    }
}
