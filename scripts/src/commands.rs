//! The deploy runner

use std::path::PathBuf;

use alloy::primitives::Address;
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    constants::{CONTRACT_NAME, LOCALHOST_NETWORK},
    deploy::DeployEnvironment,
    errors::ScriptError,
    output_writer::write_frontend_files,
};

/// Everything a deployment run reads from or writes to
pub struct DeployContext<E> {
    /// The network to deploy to
    pub environment: E,
    /// Where the compiled contracts are read from
    pub artifacts: ArtifactStore,
    /// Directory the frontend files are written to
    pub output_dir: PathBuf,
}

/// Deploy the TokenTakeOver contract and export it to the frontend.
///
/// Returns the address of the deployed contract. Nothing is written to the
/// output directory unless the deployment is confirmed.
pub async fn deploy_contracts<E: DeployEnvironment>(
    ctx: &DeployContext<E>,
) -> Result<Address, ScriptError> {
    if ctx.environment.is_ephemeral() {
        warn!(
            "You are trying to deploy a contract to the {} network, which is spawned \
             for this run and destroyed when it ends. Use the '--network {}' option",
            ctx.environment.network_name(),
            LOCALHOST_NETWORK
        );
    }

    let deployer = ctx.environment.signer().await?;
    info!("Deploying the contracts with the account: {}", deployer);

    let balance = ctx.environment.balance(deployer).await?;
    info!("Account balance: {}", balance);

    // Read the build output before sending anything
    let artifact = ctx.artifacts.read_artifact(CONTRACT_NAME)?;
    let bytecode = artifact.bytecode()?;

    let address = ctx.environment.deploy(deployer, bytecode).await?;
    info!("{} address: {}", CONTRACT_NAME, address);

    // We also save the contract's artifact and address in the frontend directory
    write_frontend_files(&ctx.output_dir, CONTRACT_NAME, address, &artifact.document)?;

    Ok(address)
}
