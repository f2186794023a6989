//! The contracts that make up the hotel booking suite.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    CommissionManagement,
    CorporateClient,
    PropertyVerification,
    RoomAllocation,
}

impl ContractKind {
    pub const ALL: [ContractKind; 4] = [
        ContractKind::CommissionManagement,
        ContractKind::CorporateClient,
        ContractKind::PropertyVerification,
        ContractKind::RoomAllocation,
    ];

    /// Cargo package name.
    pub fn package(&self) -> &'static str {
        match self {
            ContractKind::CommissionManagement => "commission-management",
            ContractKind::CorporateClient => "corporate-client",
            ContractKind::PropertyVerification => "property-verification",
            ContractKind::RoomAllocation => "room-allocation",
        }
    }

    /// Key under `[profile.<network>.contracts]` in soroban.toml.
    pub fn config_key(&self) -> &'static str {
        match self {
            ContractKind::CommissionManagement => "commission_management",
            ContractKind::CorporateClient => "corporate_client",
            ContractKind::PropertyVerification => "property_verification",
            ContractKind::RoomAllocation => "room_allocation",
        }
    }

    pub fn from_config_key(key: &str) -> Option<ContractKind> {
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.config_key() == key)
    }

    /// Environment variable holding the deployed contract id.
    pub fn env_var(&self) -> &'static str {
        match self {
            ContractKind::CommissionManagement => "SOROBAN_COMMISSION_CONTRACT_ID",
            ContractKind::CorporateClient => "SOROBAN_CORPORATE_CLIENT_CONTRACT_ID",
            ContractKind::PropertyVerification => "SOROBAN_PROPERTY_CONTRACT_ID",
            ContractKind::RoomAllocation => "SOROBAN_ALLOCATION_CONTRACT_ID",
        }
    }

    /// File name cargo gives the compiled contract.
    pub fn wasm_file(&self) -> String {
        format!("{}.wasm", self.config_key())
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_file_uses_underscored_crate_name() {
        assert_eq!(
            ContractKind::CommissionManagement.wasm_file(),
            "commission_management.wasm"
        );
        assert_eq!(ContractKind::RoomAllocation.wasm_file(), "room_allocation.wasm");
    }

    #[test]
    fn cli_names_match_packages() {
        for kind in ContractKind::ALL {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.package());
        }
    }

    #[test]
    fn config_keys_round_trip() {
        for kind in ContractKind::ALL {
            assert_eq!(ContractKind::from_config_key(kind.config_key()), Some(kind));
        }
        assert_eq!(ContractKind::from_config_key("escrow"), None);
    }

    #[test]
    fn env_vars_are_distinct() {
        let mut vars: Vec<_> = ContractKind::ALL.iter().map(|k| k.env_var()).collect();
        vars.sort();
        vars.dedup();
        assert_eq!(vars.len(), 4);
    }
}
