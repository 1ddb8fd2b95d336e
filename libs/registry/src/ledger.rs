//! In-memory snapshot of the converter ledger tables
//!
//! Three table families are captured: per-account legacy converters (settings
//! plus reserve rows), the multi-converter registry keyed by pool token, and
//! token-contract balances. Quantities are raw integer units.

use crate::error::{RegistryError, Result};
use crate::identifiers::{AccountName, SymbolCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub legacy: BTreeMap<AccountName, LegacyConverter>,
    #[serde(default)]
    pub multi: Option<MultiRegistry>,
    #[serde(default)]
    pub balances: Vec<TokenBalance>,
}

/// A converter deployed on its own account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyConverter {
    #[serde(default)]
    pub settings: Option<LegacySettings>,
    #[serde(default)]
    pub reserves: Vec<LegacyReserve>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySettings {
    pub smart_contract: AccountName,
    pub smart_currency: SymbolCode,
    pub smart_enabled: bool,
    pub enabled: bool,
    pub network: AccountName,
    pub require_balance: bool,
    pub max_fee: u64,
    pub fee: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyReserve {
    pub contract: AccountName,
    pub currency: SymbolCode,
    pub ratio: u64,
    pub p_enabled: bool,
}

/// The shared multi-converter contract and its rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRegistry {
    pub code: AccountName,
    pub settings: MultiSettings,
    #[serde(default)]
    pub converters: Vec<MultiConverter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSettings {
    pub max_fee: u64,
    pub multi_token: AccountName,
    pub network: AccountName,
    /// Empty on the ledger when no staking contract is set
    #[serde(default, deserialize_with = "empty_as_none")]
    pub staking: Option<AccountName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiConverter {
    pub currency: SymbolCode,
    pub owner: AccountName,
    pub fee: u64,
    #[serde(default)]
    pub reserve_weights: BTreeMap<SymbolCode, u64>,
    #[serde(default)]
    pub reserve_balances: BTreeMap<SymbolCode, ReserveBalance>,
    #[serde(default)]
    pub protocol_features: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub metadata_json: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveBalance {
    pub quantity: u64,
    pub contract: AccountName,
}

/// One row of a token contract's accounts table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub contract: AccountName,
    pub owner: AccountName,
    pub symbol: SymbolCode,
    pub amount: u64,
}

impl LedgerSnapshot {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn legacy_converter(&self, account: &AccountName) -> Option<&LegacyConverter> {
        self.legacy.get(account)
    }

    pub fn multi_converter(&self, currency: &SymbolCode) -> Option<&MultiConverter> {
        self.multi
            .as_ref()?
            .converters
            .iter()
            .find(|row| &row.currency == currency)
    }

    /// Balance of `symbol` held by `owner` on token `contract`
    pub fn balance(
        &self,
        contract: &AccountName,
        owner: &AccountName,
        symbol: &SymbolCode,
    ) -> Option<u64> {
        self.balances
            .iter()
            .find(|row| &row.contract == contract && &row.owner == owner && &row.symbol == symbol)
            .map(|row| row.amount)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<AccountName>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
