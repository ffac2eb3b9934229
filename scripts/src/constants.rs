//! Constants used in the deploy scripts

/// Name of the contract deployed by the scripts, also its artifact name
pub const CONTRACT_NAME: &str = "TokenTakeOver";

/// Network used when none is selected
pub const DEFAULT_NETWORK: &str = "hardhat";

/// The in-memory network, wiped after every run
pub const EPHEMERAL_NETWORK: &str = "hardhat";

/// The persistent local node network
pub const LOCALHOST_NETWORK: &str = "localhost";

/// Default RPC endpoint of a local node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Root of the compiler build output
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Directory the frontend reads its contract files from
pub const DEFAULT_OUTPUT_DIR: &str = "frontend/src/contracts";

/// File holding the deployed address record
pub const ADDRESS_FILE_NAME: &str = "contract-address.json";

/// Indentation of every json file we write
pub const JSON_INDENT: u16 = 2;
