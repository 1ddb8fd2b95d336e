//! Resolve-then-price facade
//!
//! Each call resolves the pair against its [`ReserveSource`] and runs the
//! engine on the result. Nothing is cached between calls.

use crate::error::Result;
use crate::identifiers::{PoolRef, SymbolCode};
use crate::resolver::ReserveSource;
use bancor_amm::{AmmPool, WeightedMath, WeightedPool};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a priced conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub pool: PoolRef,
    pub symbol_in: SymbolCode,
    pub symbol_out: SymbolCode,
    pub amount_in: u64,
    pub amount_out: u64,
    /// Pool fee in ppm; spot quotes report it but do not charge it
    pub fee: u64,
}

pub struct PoolQuoter<S> {
    source: S,
    math: WeightedMath,
}

impl<S: ReserveSource> PoolQuoter<S> {
    pub fn new(source: S, math: WeightedMath) -> Self {
        Self { source, math }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn math(&self) -> WeightedMath {
        self.math
    }

    fn pool(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
    ) -> Result<WeightedPool> {
        let state = self.source.pair(pool, symbol_in, symbol_out)?;
        Ok(WeightedPool::new(state, self.math))
    }

    /// Output received for exactly `amount_in` of `symbol_in`
    pub fn amount_out(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
        amount_in: u64,
    ) -> Result<SwapQuote> {
        let resolved = self.pool(pool, symbol_in, symbol_out)?;
        let amount_out = resolved.get_amount_out(amount_in)?;
        debug!(%pool, %symbol_in, %symbol_out, amount_in, amount_out, "priced exact input");
        Ok(self.swap_quote(pool, symbol_in, symbol_out, &resolved, amount_in, amount_out))
    }

    /// Minimum `symbol_in` that yields at least `amount_out` of `symbol_out`
    pub fn amount_in(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
        amount_out: u64,
    ) -> Result<SwapQuote> {
        let resolved = self.pool(pool, symbol_in, symbol_out)?;
        let amount_in = resolved.get_amount_in(amount_out)?;
        debug!(%pool, %symbol_in, %symbol_out, amount_in, amount_out, "priced exact output");
        Ok(self.swap_quote(pool, symbol_in, symbol_out, &resolved, amount_in, amount_out))
    }

    /// Fee-free spot value of `amount` of `symbol_in` in `symbol_out`
    pub fn quote(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
        amount: u64,
    ) -> Result<SwapQuote> {
        let resolved = self.pool(pool, symbol_in, symbol_out)?;
        let value = resolved.quote(amount)?;
        debug!(%pool, %symbol_in, %symbol_out, amount, value, "spot quote");
        Ok(self.swap_quote(pool, symbol_in, symbol_out, &resolved, amount, value))
    }

    fn swap_quote(
        &self,
        pool: &PoolRef,
        symbol_in: &SymbolCode,
        symbol_out: &SymbolCode,
        resolved: &WeightedPool,
        amount_in: u64,
        amount_out: u64,
    ) -> SwapQuote {
        SwapQuote {
            pool: pool.clone(),
            symbol_in: symbol_in.clone(),
            symbol_out: symbol_out.clone(),
            amount_in,
            amount_out,
            fee: resolved.get_fee(),
        }
    }
}
