//! Typed ledger identifiers
//!
//! Account names and symbol codes are validated once at the boundary so the
//! resolver never handles free-form strings, and [`PoolRef`] replaces the
//! historic prefix-sniffing of pool id strings with an explicit variant.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ACCOUNT_NAME_MAX_LEN: usize = 12;
const SYMBOL_CODE_MAX_LEN: usize = 7;

/// Ledger account name: 1-12 chars of `a-z`, `1-5` and `.`, not ending in `.`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| RegistryError::InvalidAccountName {
            input: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.len() > ACCOUNT_NAME_MAX_LEN {
            return Err(invalid("longer than 12 characters"));
        }
        if !s
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'1'..=b'5' | b'.'))
        {
            return Err(invalid("only a-z, 1-5 and '.' are allowed"));
        }
        if s.ends_with('.') {
            return Err(invalid("must not end with '.'"));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for AccountName {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token symbol code: 1-7 uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode(String);

impl SymbolCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SymbolCode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| RegistryError::InvalidSymbolCode {
            input: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.len() > SYMBOL_CODE_MAX_LEN {
            return Err(invalid("longer than 7 characters"));
        }
        if !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid("only A-Z are allowed"));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SymbolCode> for String {
    fn from(code: SymbolCode) -> Self {
        code.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which registry a pool lives in
///
/// Text forms: `bnt2eoscnvrt` for a converter account with its own settings
/// and reserves tables, `<code>:EOSBNT` (e.g. `bancorcnvrtr:EOSBNT` or
/// `multi:EOSBNT`) for a row of the multi-converter registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PoolRef {
    Legacy(AccountName),
    Multi(SymbolCode),
}

impl FromStr for PoolRef {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((_, currency)) => Ok(PoolRef::Multi(currency.parse()?)),
            None => Ok(PoolRef::Legacy(s.parse()?)),
        }
    }
}

impl TryFrom<String> for PoolRef {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PoolRef> for String {
    fn from(pool: PoolRef) -> Self {
        pool.to_string()
    }
}

impl fmt::Display for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolRef::Legacy(account) => write!(f, "{}", account),
            PoolRef::Multi(currency) => write!(f, "multi:{}", currency),
        }
    }
}
