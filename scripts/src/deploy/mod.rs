//! Access to the network the contract is deployed to

pub mod environment;

pub use environment::{DeployEnvironment, RpcEnvironment};
