//! Scripts for deploying the staking pool contracts and recording their
//! addresses per chain.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod executor;
pub mod factory;
pub mod plan;
pub mod registry;
pub mod types;
pub mod utils;
