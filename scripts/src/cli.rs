//! Definitions of CLI arguments for the deploy script

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    commands::{deploy_contracts, DeployContext},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_NETWORK, DEFAULT_OUTPUT_DIR},
    deploy::RpcEnvironment,
    errors::ScriptError,
    tx::client::{create_node_provider, create_rpc_provider, spawn_ephemeral_node},
    utils::{resolve_endpoint, Endpoint},
};

/// Deploy the TokenTakeOver contract and export it to the frontend
#[derive(Parser, Debug)]
#[command(name = "deploy")]
pub struct Cli {
    /// Network to deploy to
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Network RPC URL. Defaults to a node spawned for the run on `hardhat`
    /// and to the local node on `localhost`
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the deployer, the node accounts are used if unset
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Root of the compiler build artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Frontend directory receiving the contract address and artifact
    #[arg(short, long, env = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Run the deployment
    pub async fn run(self) -> Result<(), ScriptError> {
        let ctx = DeployContext {
            environment: self.environment()?,
            artifacts: ArtifactStore::new(self.artifacts_dir),
            output_dir: self.output_dir,
        };
        deploy_contracts(&ctx).await?;

        Ok(())
    }

    /// Connect to the selected network, spawning its node if it has none
    fn environment(&self) -> Result<RpcEnvironment, ScriptError> {
        let priv_key = self.priv_key.as_deref();

        match resolve_endpoint(&self.network, self.rpc_url.as_deref())? {
            Endpoint::Ephemeral => {
                let node = spawn_ephemeral_node()?;
                let client = create_node_provider(&node, priv_key)?;
                Ok(RpcEnvironment::new(self.network.clone(), client).with_node(node))
            }
            Endpoint::Rpc(rpc_url) => {
                info!("Using network {} at {}", self.network, rpc_url);

                // Build our RPC client with signer
                let client = create_rpc_provider(rpc_url, priv_key)?;
                Ok(RpcEnvironment::new(self.network.clone(), client))
            }
        }
    }
}
