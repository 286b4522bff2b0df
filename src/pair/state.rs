//! Mutable pair state: reserves, oracle accumulators, and the share ledger.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use super::oracle;
use crate::domain::{Event, Reserves};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, MAX_RESERVE, isqrt};

/// Everything a pair mutates.
///
/// Operations work on a clone and write it back only once every check has
/// passed, so a failed call never leaves a half-applied state behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PairState {
    pub(crate) reserve0: U256,
    pub(crate) reserve1: U256,
    pub(crate) block_timestamp_last: u32,
    pub(crate) price0_cumulative_last: U256,
    pub(crate) price1_cumulative_last: U256,
    pub(crate) k_last: U256,
    pub(crate) total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl PairState {
    pub(crate) const fn reserves(&self) -> Reserves {
        Reserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            block_timestamp_last: self.block_timestamp_last,
        }
    }

    // -- share ledger ---------------------------------------------------------

    pub(crate) fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    pub(crate) fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.insert((owner, spender), value);
    }

    pub(crate) fn mint_shares(
        &mut self,
        pair: Address,
        to: Address,
        value: U256,
        events: &mut Vec<Event>,
    ) -> Result<(), AmmError> {
        self.total_supply = self.total_supply.safe_add(value, "share supply")?;
        let balance = self.balance_of(to).safe_add(value, "share balance")?;
        self.balances.insert(to, balance);
        events.push(Event::Transfer {
            token: pair,
            from: Address::ZERO,
            to,
            value,
        });
        Ok(())
    }

    pub(crate) fn burn_shares(
        &mut self,
        pair: Address,
        from: Address,
        value: U256,
        events: &mut Vec<Event>,
    ) -> Result<(), AmmError> {
        let balance = self
            .balance_of(from)
            .checked_sub(value)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert(from, balance);
        self.total_supply = self.total_supply.safe_sub(value, "share supply")?;
        events.push(Event::Transfer {
            token: pair,
            from,
            to: Address::ZERO,
            value,
        });
        Ok(())
    }

    pub(crate) fn move_shares(
        &mut self,
        pair: Address,
        from: Address,
        to: Address,
        value: U256,
        events: &mut Vec<Event>,
    ) -> Result<(), AmmError> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(value)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert(from, from_balance);
        let to_balance = self.balance_of(to).safe_add(value, "share balance")?;
        self.balances.insert(to, to_balance);
        events.push(Event::Transfer {
            token: pair,
            from,
            to,
            value,
        });
        Ok(())
    }

    // -- reserves -------------------------------------------------------------

    /// Folds the elapsed time into the price accumulators, then caches the
    /// new balances as reserves.
    ///
    /// Accumulation uses the reserves from *before* this update and only
    /// happens when time has passed and both reserves are non-zero.
    pub(crate) fn update(
        &mut self,
        balance0: U256,
        balance1: U256,
        now: u32,
    ) -> Result<(), AmmError> {
        if balance0 > MAX_RESERVE || balance1 > MAX_RESERVE {
            return Err(AmmError::Overflow("reserve exceeds 112 bits"));
        }
        let elapsed = now.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && !self.reserve0.is_zero() && !self.reserve1.is_zero() {
            self.price0_cumulative_last = oracle::accumulate(
                self.price0_cumulative_last,
                self.reserve0,
                self.reserve1,
                elapsed,
            );
            self.price1_cumulative_last = oracle::accumulate(
                self.price1_cumulative_last,
                self.reserve1,
                self.reserve0,
                elapsed,
            );
        }
        self.reserve0 = balance0;
        self.reserve1 = balance1;
        self.block_timestamp_last = now;
        Ok(())
    }

    /// Current `reserve0 * reserve1`.  Cannot overflow while both reserves
    /// respect [`MAX_RESERVE`].
    pub(crate) fn k(&self) -> Result<U256, AmmError> {
        self.reserve0.safe_mul(self.reserve1, "reserve product")
    }

    /// Mints the protocol's share of fee growth since `k_last` to `fee_to`.
    ///
    /// Returns whether the protocol fee is on.  With the fee off a stale
    /// `k_last` is cleared.
    pub(crate) fn mint_fee(
        &mut self,
        pair: Address,
        fee_to: Option<Address>,
        events: &mut Vec<Event>,
    ) -> Result<bool, AmmError> {
        let Some(fee_to) = fee_to else {
            self.k_last = U256::ZERO;
            return Ok(false);
        };
        if self.k_last.is_zero() {
            return Ok(true);
        }
        let root_k = isqrt(self.k()?);
        let root_k_last = isqrt(self.k_last);
        if root_k > root_k_last {
            let numerator = self
                .total_supply
                .safe_mul(root_k - root_k_last, "fee numerator")?;
            let denominator = root_k
                .safe_mul(U256::from(5u8), "fee denominator")?
                .safe_add(root_k_last, "fee denominator")?;
            let liquidity = numerator.safe_div(denominator)?;
            if !liquidity.is_zero() {
                self.mint_shares(pair, fee_to, liquidity, events)?;
            }
        }
        Ok(true)
    }
}
