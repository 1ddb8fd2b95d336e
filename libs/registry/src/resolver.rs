//! Reserve resolution over the ledger snapshot
//!
//! [`ReserveSource`] is the seam between ledger storage and the pricing
//! engine. [`LedgerResolver`] is the snapshot-backed implementation; anything
//! else able to answer fee/reserve lookups (a live RPC reader, a test double)
//! plugs into [`crate::PoolQuoter`] the same way.

use crate::error::{RegistryError, Result};
use crate::identifiers::{AccountName, PoolRef, SymbolCode};
use crate::ledger::{LedgerSnapshot, LegacyConverter, MultiConverter};
use bancor_amm::{WeightedPoolState, FEE_SCALE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Scale a ledger source stores its fees in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeScale {
    /// Parts per million, the engine's native scale
    #[default]
    Ppm,
    /// Basis points
    Bps,
}

impl FeeScale {
    /// Convert a stored fee to ppm; `None` on overflow
    pub fn to_ppm(self, fee: u64) -> Option<u64> {
        match self {
            FeeScale::Ppm => Some(fee),
            FeeScale::Bps => fee.checked_mul(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverSettings {
    pub legacy_fee_scale: FeeScale,
    pub multi_fee_scale: FeeScale,
}

/// One reserve of a pool with its current balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve {
    pub contract: AccountName,
    pub symbol: SymbolCode,
    pub weight: u64,
    pub balance: u64,
    /// Purchases through this reserve are allowed
    pub enabled: bool,
}

/// Read-only access to pool fees and reserves
pub trait ReserveSource {
    /// Pool fee in ppm
    fn fee(&self, pool: &PoolRef) -> Result<u64>;

    fn reserves(&self, pool: &PoolRef) -> Result<Vec<Reserve>>;

    fn reserve(&self, pool: &PoolRef, symbol: &SymbolCode) -> Result<Reserve>;

    /// Whether the pool accepts conversions at all
    fn conversions_enabled(&self, pool: &PoolRef) -> Result<bool>;

    /// Engine inputs for converting `symbol_in` into `symbol_out`
    fn pair(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
    ) -> Result<WeightedPoolState> {
        if symbol_in == symbol_out {
            return Err(RegistryError::SameReserve(symbol_in.clone()));
        }
        if !self.conversions_enabled(pool)? {
            return Err(RegistryError::ConversionsDisabled(pool.clone()));
        }

        let fee = self.fee(pool)?;
        if fee >= FEE_SCALE {
            return Err(RegistryError::FeeOutOfRange {
                pool: pool.clone(),
                fee,
                scale: FEE_SCALE,
            });
        }

        let reserve_in = self.reserve(pool, symbol_in)?;
        let reserve_out = self.reserve(pool, symbol_out)?;
        for reserve in [&reserve_in, &reserve_out] {
            if !reserve.enabled {
                return Err(RegistryError::ReserveDisabled {
                    pool: pool.clone(),
                    symbol: reserve.symbol.clone(),
                });
            }
        }

        Ok(WeightedPoolState {
            reserve_in: reserve_in.balance,
            weight_in: reserve_in.weight,
            reserve_out: reserve_out.balance,
            weight_out: reserve_out.weight,
            fee,
        })
    }
}

/// [`ReserveSource`] backed by an immutable [`LedgerSnapshot`]
#[derive(Debug, Clone)]
pub struct LedgerResolver {
    snapshot: LedgerSnapshot,
    settings: ResolverSettings,
}

impl LedgerResolver {
    pub fn new(snapshot: LedgerSnapshot, settings: ResolverSettings) -> Self {
        debug!(
            legacy = snapshot.legacy.len(),
            multi = snapshot.multi.as_ref().map_or(0, |m| m.converters.len()),
            balances = snapshot.balances.len(),
            "ledger snapshot loaded"
        );
        Self { snapshot, settings }
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    fn legacy(&self, account: &AccountName) -> Result<&LegacyConverter> {
        self.snapshot
            .legacy_converter(account)
            .ok_or_else(|| RegistryError::UnknownConverter(account.clone()))
    }

    fn multi(&self, currency: &SymbolCode) -> Result<&MultiConverter> {
        self.snapshot
            .multi_converter(currency)
            .ok_or_else(|| RegistryError::UnknownCurrency(currency.clone()))
    }

    fn normalize_fee(&self, pool: &PoolRef, scale: FeeScale, stored: u64) -> Result<u64> {
        let fee = scale
            .to_ppm(stored)
            .ok_or_else(|| RegistryError::FeeScaleOverflow {
                pool: pool.clone(),
                stored,
                scale,
            })?;
        debug!(%pool, stored, ?scale, fee, "pool fee resolved");
        Ok(fee)
    }

    fn legacy_reserve(&self, account: &AccountName, symbol: &SymbolCode) -> Result<Reserve> {
        let converter = self.legacy(account)?;
        let row = converter
            .reserves
            .iter()
            .find(|row| &row.currency == symbol)
            .ok_or_else(|| RegistryError::UnknownReserve {
                pool: PoolRef::Legacy(account.clone()),
                symbol: symbol.clone(),
            })?;

        let balance = self
            .snapshot
            .balance(&row.contract, account, symbol)
            .ok_or_else(|| RegistryError::MissingBalance {
                contract: row.contract.clone(),
                owner: account.clone(),
                symbol: symbol.clone(),
            })?;

        Ok(Reserve {
            contract: row.contract.clone(),
            symbol: symbol.clone(),
            weight: row.ratio,
            balance,
            enabled: row.p_enabled,
        })
    }

    fn multi_reserve(&self, currency: &SymbolCode, symbol: &SymbolCode) -> Result<Reserve> {
        let pool = || PoolRef::Multi(currency.clone());
        let converter = self.multi(currency)?;

        let entry =
            converter
                .reserve_balances
                .get(symbol)
                .ok_or_else(|| RegistryError::UnknownReserve {
                    pool: pool(),
                    symbol: symbol.clone(),
                })?;
        let weight = converter.reserve_weights.get(symbol).copied().ok_or_else(|| {
            RegistryError::MissingWeight {
                pool: pool(),
                symbol: symbol.clone(),
            }
        })?;

        Ok(Reserve {
            contract: entry.contract.clone(),
            symbol: symbol.clone(),
            weight,
            balance: entry.quantity,
            enabled: true,
        })
    }
}

impl ReserveSource for LedgerResolver {
    fn fee(&self, pool: &PoolRef) -> Result<u64> {
        match pool {
            PoolRef::Legacy(account) => {
                let settings = self
                    .legacy(account)?
                    .settings
                    .as_ref()
                    .ok_or_else(|| RegistryError::MissingSettings(account.clone()))?;
                if settings.fee > settings.max_fee {
                    warn!(
                        %pool,
                        fee = settings.fee,
                        max_fee = settings.max_fee,
                        "fee above converter max_fee"
                    );
                }
                self.normalize_fee(pool, self.settings.legacy_fee_scale, settings.fee)
            }
            PoolRef::Multi(currency) => {
                let stored = self.multi(currency)?.fee;
                self.normalize_fee(pool, self.settings.multi_fee_scale, stored)
            }
        }
    }

    fn reserves(&self, pool: &PoolRef) -> Result<Vec<Reserve>> {
        match pool {
            PoolRef::Legacy(account) => self
                .legacy(account)?
                .reserves
                .iter()
                .map(|row| self.legacy_reserve(account, &row.currency))
                .collect(),
            // every weighted reserve must carry a balance
            PoolRef::Multi(currency) => self
                .multi(currency)?
                .reserve_weights
                .keys()
                .map(|symbol| self.multi_reserve(currency, symbol))
                .collect(),
        }
    }

    fn reserve(&self, pool: &PoolRef, symbol: &SymbolCode) -> Result<Reserve> {
        let reserve = match pool {
            PoolRef::Legacy(account) => self.legacy_reserve(account, symbol)?,
            PoolRef::Multi(currency) => self.multi_reserve(currency, symbol)?,
        };
        debug!(
            %pool,
            %symbol,
            balance = reserve.balance,
            weight = reserve.weight,
            "reserve resolved"
        );
        Ok(reserve)
    }

    fn conversions_enabled(&self, pool: &PoolRef) -> Result<bool> {
        match pool {
            PoolRef::Legacy(account) => self
                .legacy(account)?
                .settings
                .as_ref()
                .map(|settings| settings.enabled)
                .ok_or_else(|| RegistryError::MissingSettings(account.clone())),
            PoolRef::Multi(currency) => self.multi(currency).map(|_| true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "legacy": {
            "bpsconverter": {
                "settings": {
                    "smart_contract": "bntbpsrelay", "smart_currency": "BNTBPS",
                    "smart_enabled": true, "enabled": true, "network": "thisisbancor",
                    "require_balance": false, "max_fee": 300, "fee": 20
                },
                "reserves": [
                    { "contract": "bntbntbntbnt", "currency": "BNT", "ratio": 500000, "p_enabled": true },
                    { "contract": "eosio.token", "currency": "EOS", "ratio": 500000, "p_enabled": true }
                ]
            },
            "bare": { "reserves": [] }
        },
        "multi": {
            "code": "bancorcnvrtr",
            "settings": { "max_fee": 30000, "multi_token": "smarttokens1", "network": "thisisbancor", "staking": "" },
            "converters": [{
                "currency": "HALFBNT", "owner": "someowner", "fee": 25,
                "reserve_weights": { "BNT": 500000, "USD": 500000 },
                "reserve_balances": {
                    "BNT": { "quantity": 1000000, "contract": "bntbntbntbnt" },
                    "USD": { "quantity": 2000000, "contract": "stablecoinzz" }
                }
            }]
        },
        "balances": [
            { "contract": "bntbntbntbnt", "owner": "bpsconverter", "symbol": "BNT", "amount": 125682033533 },
            { "contract": "eosio.token", "owner": "bpsconverter", "symbol": "EOS", "amount": 45851931234 }
        ]
    }"#;

    fn resolver(settings: ResolverSettings) -> LedgerResolver {
        LedgerResolver::new(LedgerSnapshot::from_json_str(SNAPSHOT).unwrap(), settings)
    }

    fn sym(code: &str) -> SymbolCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_fee_scale_conversion() {
        assert_eq!(FeeScale::Ppm.to_ppm(2000), Some(2000));
        assert_eq!(FeeScale::Bps.to_ppm(20), Some(2000));
        assert_eq!(FeeScale::Bps.to_ppm(u64::MAX), None);
    }

    #[test]
    fn test_fee_normalised_per_source() {
        let legacy: PoolRef = "bpsconverter".parse().unwrap();
        let multi: PoolRef = "multi:HALFBNT".parse().unwrap();

        let bps = resolver(ResolverSettings {
            legacy_fee_scale: FeeScale::Bps,
            multi_fee_scale: FeeScale::Bps,
        });
        assert_eq!(bps.fee(&legacy).unwrap(), 2000);
        assert_eq!(bps.fee(&multi).unwrap(), 2500);

        let ppm = resolver(ResolverSettings::default());
        assert_eq!(ppm.fee(&legacy).unwrap(), 20);
    }

    #[test]
    fn test_legacy_pair_reads_token_balances() {
        let resolver = resolver(ResolverSettings {
            legacy_fee_scale: FeeScale::Bps,
            ..Default::default()
        });
        let pool: PoolRef = "bpsconverter".parse().unwrap();
        let state = resolver.pair(&pool, &sym("EOS"), &sym("BNT")).unwrap();
        assert_eq!(
            state,
            WeightedPoolState {
                reserve_in: 45_851_931_234,
                weight_in: 500_000,
                reserve_out: 125_682_033_533,
                weight_out: 500_000,
                fee: 2000,
            }
        );
        assert_eq!(
            bancor_amm::get_amount_out(
                10_000,
                state.reserve_in,
                state.weight_in,
                state.reserve_out,
                state.weight_out,
                state.fee
            )
            .unwrap(),
            27_300
        );
    }

    #[test]
    fn test_reserves_listing_order() {
        let resolver = resolver(ResolverSettings::default());

        let legacy = resolver.reserves(&"bpsconverter".parse().unwrap()).unwrap();
        let symbols: Vec<_> = legacy.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["BNT", "EOS"]);

        let multi = resolver.reserves(&"multi:HALFBNT".parse().unwrap()).unwrap();
        assert_eq!(multi.len(), 2);
        assert_eq!(multi[1].symbol.as_str(), "USD");
        assert_eq!(multi[1].balance, 2_000_000);
        assert_eq!(multi[1].contract.as_str(), "stablecoinzz");
    }

    #[test]
    fn test_bps_fee_overflow_reports_stored_scale() {
        let mut snapshot = LedgerSnapshot::from_json_str(SNAPSHOT).unwrap();
        let account: AccountName = "bpsconverter".parse().unwrap();
        if let Some(settings) = snapshot
            .legacy
            .get_mut(&account)
            .and_then(|converter| converter.settings.as_mut())
        {
            settings.fee = u64::MAX;
        }
        let resolver = LedgerResolver::new(
            snapshot,
            ResolverSettings {
                legacy_fee_scale: FeeScale::Bps,
                ..Default::default()
            },
        );

        let err = resolver.fee(&PoolRef::Legacy(account)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::FeeScaleOverflow {
                stored: u64::MAX,
                scale: FeeScale::Bps,
                ..
            }
        ));
        let message = err.to_string();
        assert!(message.contains("Bps"), "{}", message);
        assert!(!message.contains("ppm is outside"), "{}", message);
    }

    #[test]
    fn test_weighted_reserve_without_balance_is_an_error() {
        let mut snapshot = LedgerSnapshot::from_json_str(SNAPSHOT).unwrap();
        if let Some(multi) = snapshot.multi.as_mut() {
            for converter in &mut multi.converters {
                converter.reserve_balances.remove(&sym("USD"));
            }
        }
        let resolver = LedgerResolver::new(snapshot, ResolverSettings::default());

        let err = resolver
            .reserves(&"multi:HALFBNT".parse().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownReserve { ref symbol, .. } if symbol.as_str() == "USD"
        ));
    }

    #[test]
    fn test_missing_settings() {
        let resolver = resolver(ResolverSettings::default());
        let pool: PoolRef = "bare".parse().unwrap();
        assert!(matches!(
            resolver.fee(&pool),
            Err(RegistryError::MissingSettings(_))
        ));
        assert!(matches!(
            resolver.pair(&pool, &sym("EOS"), &sym("BNT")),
            Err(RegistryError::MissingSettings(_))
        ));
    }

    #[test]
    fn test_empty_staking_is_none() {
        let resolver = resolver(ResolverSettings::default());
        let multi = resolver.snapshot().multi.as_ref().unwrap();
        assert_eq!(multi.settings.staking, None);
    }
}
