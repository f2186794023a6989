//! Hotel booking contract tools
//!
//! Configuration, deployment helpers and off-chain previews for the hotel
//! booking Soroban contracts.

pub mod config;
pub mod contracts;
pub mod deploy;
pub mod quote;

pub use config::{Config, ConfigError, Network};
pub use contracts::ContractKind;
pub use deploy::{DeployError, Invocation};
pub use quote::{quote_commission, QuoteError};
