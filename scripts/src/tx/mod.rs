//! RPC client construction

pub mod client;
