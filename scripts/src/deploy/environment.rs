//! JSON-RPC access to the deployment network

use alloy::{
    network::TransactionBuilder,
    node_bindings::AnvilInstance,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tracing::info;

use crate::{
    errors::ScriptError,
    tx::client::{RpcClient, RpcProvider},
    utils::is_ephemeral_network,
};

/// Everything the deploy runner needs from the network it deploys to
#[async_trait]
pub trait DeployEnvironment: Send + Sync {
    /// Name of the selected network
    fn network_name(&self) -> &str;

    /// Whether the chain is dropped once the run ends
    fn is_ephemeral(&self) -> bool {
        is_ephemeral_network(self.network_name())
    }

    /// The first account able to sign transactions
    async fn signer(&self) -> Result<Address, ScriptError>;

    /// Current balance of the account, in wei
    async fn balance(&self, account: Address) -> Result<U256, ScriptError>;

    /// Send the creation transaction for `bytecode` and wait for its receipt,
    /// returning the address of the new contract
    async fn deploy(&self, from: Address, bytecode: Bytes) -> Result<Address, ScriptError>;
}

/// A [`DeployEnvironment`] backed by a JSON-RPC node
pub struct RpcEnvironment {
    /// Name of the network the node belongs to
    network: String,
    /// Provider used for every call
    provider: RpcProvider,
    /// Address of the local signer, if one was configured
    local_signer: Option<Address>,
    /// Node spawned for this run, killed on drop
    node: Option<AnvilInstance>,
}

impl RpcEnvironment {
    /// Wrap the given client for the named network
    pub fn new(network: impl Into<String>, client: RpcClient) -> Self {
        Self {
            network: network.into(),
            provider: client.provider,
            local_signer: client.local_signer,
            node: None,
        }
    }

    /// Keep the spawned node alive as long as the environment
    pub fn with_node(mut self, node: AnvilInstance) -> Self {
        self.node = Some(node);
        self
    }
}

#[async_trait]
impl DeployEnvironment for RpcEnvironment {
    fn network_name(&self) -> &str {
        &self.network
    }

    fn is_ephemeral(&self) -> bool {
        self.node.is_some()
    }

    async fn signer(&self) -> Result<Address, ScriptError> {
        // First call on the node, so an unreachable one fails here
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        info!("Connected to {} on chain ID: {}", self.network, chain_id);

        if let Some(signer) = self.local_signer {
            return Ok(signer);
        }

        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| ScriptError::SignerUnavailable(e.to_string()))?;

        accounts.first().copied().ok_or_else(|| {
            ScriptError::SignerUnavailable(String::from(
                "no private key set and the node manages no account",
            ))
        })
    }

    async fn balance(&self, account: Address) -> Result<U256, ScriptError> {
        self.provider
            .get_balance(account)
            .await
            .map_err(|e| ScriptError::BalanceFetching(e.to_string()))
    }

    async fn deploy(&self, from: Address, bytecode: Bytes) -> Result<Address, ScriptError> {
        // Build the tx
        let tx_request = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(bytecode);

        // Send it
        let pending_tx = self
            .provider
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("Pending deploy transaction... {}", pending_tx.tx_hash());

        // Wait for the transaction to be included.
        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "transaction {} reverted",
                receipt.transaction_hash
            )));
        }
        if let Some(block) = receipt.block_number {
            info!("Deploy tx done on block: {}", block);
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt of {} holds no contract address",
                receipt.transaction_hash
            ))
        })
    }
}
