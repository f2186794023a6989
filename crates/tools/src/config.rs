//! Network and deployment configuration for the hotel booking contracts.
//!
//! Configuration is resolved in priority order:
//!
//! 1. Command-line network override
//! 2. Environment variables (SOROBAN_*), including a `.env` file
//! 3. soroban.toml profile for the selected network
//! 4. Built-in network defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use hotelchain_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! println!("Network: {}", config.network);
//! println!("RPC URL: {}", config.rpc_url);
//! # Ok(())
//! # }
//! ```

use crate::contracts::ContractKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "soroban.toml";
const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid network: {0}. Must be: testnet, mainnet, or sandbox")]
    InvalidNetwork(String),

    #[error("No contract id configured for {kind}; set {var} or [profile.<network>.contracts]")]
    MissingContractId { kind: ContractKind, var: &'static str },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
    /// Local Soroban quickstart container
    Sandbox,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Sandbox => "sandbox",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://soroban-testnet.stellar.org",
            Network::Mainnet => "https://mainnet.sorobanrpc.com",
            Network::Sandbox => "http://localhost:8000/soroban/rpc",
        }
    }

    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
            Network::Sandbox => "Standalone Network ; February 2017",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "sandbox" => Ok(Network::Sandbox),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `[profile.<network>]` table from soroban.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkProfile {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub network_passphrase: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    /// Contract ids keyed by `ContractKind::config_key`.
    #[serde(default)]
    pub contracts: BTreeMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SorobanToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

impl SorobanToml {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    #[serde(serialize_with = "serialize_display")]
    pub network: Network,
    pub rpc_url: String,
    pub network_passphrase: String,
    /// Source identity or G... address used to sign transactions.
    pub account: Option<String>,
    /// Deployed contract ids, keyed by contract.
    pub contracts: BTreeMap<ContractKind, String>,
    pub rpc_timeout_ms: u64,
    pub debug: bool,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// True for "true"/"1"/"yes", case-insensitive.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// Load configuration from `.env`, the process environment and
    /// `soroban.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if soroban.toml exists but cannot be parsed, the
    /// network name is unknown, or a resolved value fails validation.
    pub fn load(network_override: Option<&str>) -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        let path = Path::new(DEFAULT_CONFIG_FILE);
        let toml = if path.exists() {
            Some(SorobanToml::from_path(path)?)
        } else {
            None
        };

        Self::resolve(network_override, |name| std::env::var(name).ok(), toml.as_ref())
    }

    /// Resolve a configuration from an explicit variable lookup and an
    /// optional parsed soroban.toml.
    pub fn resolve<F>(
        network_override: Option<&str>,
        var: F,
        toml: Option<&SorobanToml>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_name = network_override
            .map(str::to_string)
            .or_else(|| var("SOROBAN_NETWORK"))
            .or_else(|| toml.and_then(|t| t.default.as_ref()).and_then(|d| d.network.clone()))
            .unwrap_or_else(|| Network::Testnet.as_str().to_string());

        let network = Network::from_str(&network_name)?;

        let profile = toml.and_then(|t| t.profile.get(network.as_str()));

        let rpc_url = var("SOROBAN_RPC_URL")
            .or_else(|| profile.and_then(|p| p.rpc_url.clone()))
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let network_passphrase = var("SOROBAN_NETWORK_PASSPHRASE")
            .or_else(|| profile.and_then(|p| p.network_passphrase.clone()))
            .unwrap_or_else(|| network.passphrase().to_string());

        let account = var("SOROBAN_ACCOUNT").or_else(|| profile.and_then(|p| p.account.clone()));

        let mut contracts = BTreeMap::new();
        for (key, id) in profile.iter().flat_map(|p| p.contracts.iter()) {
            let kind = ContractKind::from_config_key(key).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown contract in soroban.toml: {}", key))
            })?;
            contracts.insert(kind, id.clone());
        }
        for kind in ContractKind::ALL {
            if let Some(id) = var(kind.env_var()) {
                contracts.insert(kind, id);
            }
        }

        let rpc_timeout_ms = match var("SOROBAN_RPC_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!("SOROBAN_RPC_TIMEOUT_MS is not a number: {}", raw))
            })?,
            None => DEFAULT_RPC_TIMEOUT_MS,
        };

        let debug = var("SOROBAN_DEBUG").map(|s| parse_flag(&s)).unwrap_or(false);

        let config = Config {
            network,
            rpc_url,
            network_passphrase,
            account,
            contracts,
            rpc_timeout_ms,
            debug,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.is_empty() {
            return Err(ConfigError::MissingField("rpc_url".to_string()));
        }

        if self.network_passphrase.is_empty() {
            return Err(ConfigError::MissingField("network_passphrase".to_string()));
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "RPC URL must start with http:// or https://: {}",
                self.rpc_url
            )));
        }

        if self.network == Network::Mainnet && self.rpc_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(
                "mainnet RPC must use https".to_string(),
            ));
        }

        if self.rpc_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "rpc_timeout_ms must be greater than zero".to_string(),
            ));
        }

        for (kind, id) in &self.contracts {
            if !is_contract_strkey(id) {
                return Err(ConfigError::ValidationError(format!(
                    "{} contract id is not a C... strkey: {}",
                    kind, id
                )));
            }
        }

        Ok(())
    }

    /// Deployed id of `kind`.
    pub fn contract_id(&self, kind: ContractKind) -> Result<&str, ConfigError> {
        self.contracts
            .get(&kind)
            .map(String::as_str)
            .ok_or(ConfigError::MissingContractId {
                kind,
                var: kind.env_var(),
            })
    }

    pub fn print_summary(&self) {
        println!("Hotel booking contracts: resolved configuration");
        println!("  Network:             {}", self.network);
        println!("  RPC URL:             {}", self.rpc_url);
        println!("  Network Passphrase:  {}", self.network_passphrase);
        println!(
            "  Account:             {}",
            self.account.as_deref().unwrap_or("(not configured)")
        );
        for kind in ContractKind::ALL {
            println!(
                "  {:<22} {}",
                format!("{}:", kind),
                self.contracts.get(&kind).map(String::as_str).unwrap_or("(not deployed)")
            );
        }
        println!("  RPC Timeout:         {}ms", self.rpc_timeout_ms);
        if self.debug {
            println!("  Debug Mode:          ENABLED");
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Contract ids are 56-character base32 strkeys starting with 'C'.
fn is_contract_strkey(id: &str) -> bool {
    id.len() == 56
        && id.starts_with('C')
        && id
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
}
