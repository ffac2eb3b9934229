//! Script deploying the TokenTakeOver contract and exporting its address and
//! build artifact to the frontend.

#![warn(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod deploy;
pub mod errors;
pub mod output_writer;
pub mod tx;
pub mod utils;
