//! Liquidity entry points of the router.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::debug;

use super::{Router, Transaction, pair_for, quote};
use crate::domain::{AddLiquidity, CallContext, RemoveLiquidity};
use crate::error::AmmError;
use crate::factory::PairRegistry;
use crate::pair::Pair;
use crate::traits::{PairAddressDeriver, TokenLedger, WrappedNative};

impl Router {
    /// Deposits up to the desired amounts of both tokens into their pair
    /// and mints shares to `params.to`, creating the pair if it is missing.
    ///
    /// On an empty pair the desired amounts set the price.  Otherwise one
    /// side is scaled down to the current reserve ratio.
    ///
    /// Returns `(amount_a, amount_b, liquidity)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if the ratio-adjusted amount falls below its minimum.
    /// - Any registry error if the pair must be created.
    /// - Any ledger or pair error.
    pub fn add_liquidity<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &mut PairRegistry<D>,
        ledger: &mut L,
        params: &AddLiquidity,
    ) -> Result<(U256, U256, U256), AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver + Clone,
    {
        Self::ensure(ctx, params.deadline)?;
        self.with_pair(ctx, registry, params.token_a, params.token_b, |ctx, registry, pair| {
            let (amount_a, amount_b) = optimal_amounts(&pair, params)?;
            Transaction::run(ctx, ledger, |ctx, tx| {
                let caller = ctx.caller();
                for (token, amount) in [(params.token_a, amount_a), (params.token_b, amount_b)] {
                    tx.ledger()
                        .transfer_from(token, self.address, caller, pair.address(), amount)?;
                }
                tx.touch(&pair);
                let liquidity = ctx.as_caller(self.address, |ctx| {
                    pair.mint(ctx, &*tx.ledger(), params.to)
                })?;
                debug!(
                    pair = %pair.address(),
                    %amount_a,
                    %amount_b,
                    %liquidity,
                    "liquidity added"
                );
                Ok((amount_a, amount_b, liquidity))
            })
        })
    }

    /// Like [`add_liquidity`](Self::add_liquidity) with native currency as
    /// token B.
    ///
    /// `params.token_b` must be the wrapped native token and
    /// `params.amount_b_desired` is the native value the caller sends.  The
    /// router wraps what the pair needs and refunds the rest.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if `params.token_b` is not the wrapped
    ///   native token.
    /// - Everything [`add_liquidity`](Self::add_liquidity) returns.
    pub fn add_liquidity_native<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &mut PairRegistry<D>,
        ledger: &mut L,
        params: &AddLiquidity,
    ) -> Result<(U256, U256, U256), AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver + Clone,
    {
        Self::ensure(ctx, params.deadline)?;
        self.require_wrapped(params.token_b)?;
        self.with_pair(ctx, registry, params.token_a, params.token_b, |ctx, registry, pair| {
            let (amount_token, amount_native) = optimal_amounts(&pair, params)?;
            Transaction::run(ctx, ledger, |ctx, tx| {
                let caller = ctx.caller();
                tx.ledger().transfer_from(
                    params.token_a,
                    self.address,
                    caller,
                    pair.address(),
                    amount_token,
                )?;
                self.wrap_into(
                    ctx,
                    tx,
                    pair.address(),
                    params.amount_b_desired,
                    amount_native,
                )?;
                tx.touch(&pair);
                let liquidity = ctx.as_caller(self.address, |ctx| {
                    pair.mint(ctx, &*tx.ledger(), params.to)
                })?;
                Ok((amount_token, amount_native, liquidity))
            })
        })
    }

    /// Returns `params.liquidity` shares of the caller to their pair and
    /// pays both tokens to `params.to`.
    ///
    /// The router must be approved as spender on the caller's shares.
    ///
    /// Returns `(amount_a, amount_b)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the deadline.
    /// - [`AmmError::PairNotFound`] if the pair does not exist.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if a payout falls below its minimum.
    /// - Any share, ledger, or pair error.
    pub fn remove_liquidity<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        params: &RemoveLiquidity,
    ) -> Result<(U256, U256), AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, params.deadline)?;
        let pair = pair_for(registry, params.token_a, params.token_b)?;
        Transaction::run(ctx, ledger, |ctx, tx| {
            self.burn_shares(ctx, tx, &pair, params, params.to)
        })
    }

    /// Like [`remove_liquidity`](Self::remove_liquidity) with native
    /// currency as token B.  The wrapped side is unwrapped and paid to
    /// `params.to` as native currency.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if `params.token_b` is not the wrapped
    ///   native token.
    /// - Everything [`remove_liquidity`](Self::remove_liquidity) returns.
    pub fn remove_liquidity_native<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        params: &RemoveLiquidity,
    ) -> Result<(U256, U256), AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, params.deadline)?;
        self.require_wrapped(params.token_b)?;
        let pair = pair_for(registry, params.token_a, params.token_b)?;
        Transaction::run(ctx, ledger, |ctx, tx| {
            let (amount_token, amount_native) =
                self.burn_shares(ctx, tx, &pair, params, self.address)?;
            tx.ledger()
                .transfer(params.token_a, self.address, params.to, amount_token)?;
            self.unwrap_to(tx, params.to, amount_native)?;
            Ok((amount_token, amount_native))
        })
    }

    /// Moves the caller's shares into `pair`, burns them to `recipient`,
    /// and checks the minimums.
    fn burn_shares<L: TokenLedger + Clone>(
        &self,
        ctx: &mut CallContext,
        tx: &mut Transaction<L>,
        pair: &Arc<Pair>,
        params: &RemoveLiquidity,
        recipient: Address,
    ) -> Result<(U256, U256), AmmError> {
        let owner = ctx.caller();
        tx.touch(pair);
        let (amount0, amount1) = ctx.as_caller(self.address, |ctx| {
            pair.transfer_from(ctx, owner, pair.address(), params.liquidity)?;
            pair.burn(ctx, tx.ledger(), recipient)
        })?;
        let (amount_a, amount_b) = if params.token_a == pair.token0() {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        if amount_a < params.amount_a_min {
            return Err(AmmError::InsufficientAAmount);
        }
        if amount_b < params.amount_b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        debug!(pair = %pair.address(), %amount_a, %amount_b, "liquidity removed");
        Ok((amount_a, amount_b))
    }

    /// Runs `op` on the pair for two tokens, creating the pair first if
    /// needed.  A pair created here is removed again if `op` fails.
    fn with_pair<D, T, F>(
        &self,
        ctx: &mut CallContext,
        registry: &mut PairRegistry<D>,
        token_a: Address,
        token_b: Address,
        op: F,
    ) -> Result<T, AmmError>
    where
        D: PairAddressDeriver + Clone,
        F: FnOnce(&mut CallContext, &PairRegistry<D>, Arc<Pair>) -> Result<T, AmmError>,
    {
        if let Some(pair) = registry.get_pair(token_a, token_b) {
            return op(ctx, registry, pair);
        }
        let snapshot = registry.clone();
        let mark = ctx.event_mark();
        let created = ctx.as_caller(self.address, |ctx| {
            registry.create_pair(ctx, token_a, token_b)
        });
        let result = created
            .and_then(|_| pair_for(registry, token_a, token_b))
            .and_then(|pair| op(ctx, registry, pair));
        if result.is_err() {
            *registry = snapshot;
            ctx.truncate_events(mark);
        }
        result
    }
}

/// Amounts of both tokens to deposit given the pair's current reserves.
fn optimal_amounts(pair: &Pair, params: &AddLiquidity) -> Result<(U256, U256), AmmError> {
    let (reserve_a, reserve_b) = pair
        .get_reserves()
        .oriented(pair.token0(), pair.token1(), params.token_a)?;
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((params.amount_a_desired, params.amount_b_desired));
    }
    let amount_b_optimal = quote(params.amount_a_desired, reserve_a, reserve_b)?;
    if amount_b_optimal <= params.amount_b_desired {
        if amount_b_optimal < params.amount_b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        return Ok((params.amount_a_desired, amount_b_optimal));
    }
    let amount_a_optimal = quote(params.amount_b_desired, reserve_b, reserve_a)?;
    if amount_a_optimal > params.amount_a_desired || amount_a_optimal < params.amount_a_min {
        return Err(AmmError::InsufficientAAmount);
    }
    Ok((amount_a_optimal, params.amount_b_desired))
}
