//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error when building output file
    JsonOutputError(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// No account is available to sign the deployment
    SignerUnavailable(String),
    /// Error when fetching the deployer balance
    BalanceFetching(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// The build artifact doesn't hold deployable bytecode
    ContractCompilation(String),
    /// No build artifact matches the contract name
    ArtifactNotFound(String),
    /// Several build artifacts match the contract name
    ArtifactAmbiguous(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error writing json output: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::SignerUnavailable(s) => write!(f, "no signer available: {}", s),
            ScriptError::BalanceFetching(s) => {
                write!(f, "error fetching the deployer balance: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractCompilation(s) => {
                write!(f, "invalid contract build artifact: {}", s)
            }
            ScriptError::ArtifactNotFound(s) => {
                write!(f, "build artifact not found, compile the contracts first: {}", s)
            }
            ScriptError::ArtifactAmbiguous(s) => {
                write!(f, "several build artifacts match the contract: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
