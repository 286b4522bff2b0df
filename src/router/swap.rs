//! Swap entry points of the router.

use alloy_primitives::{Address, U256};

use super::{Router, Transaction, get_amounts_in, get_amounts_out, pair_for};
use crate::domain::{CallContext, Route};
use crate::error::AmmError;
use crate::factory::PairRegistry;
use crate::traits::{PairAddressDeriver, TokenLedger, WrappedNative};

impl Router {
    /// Swaps exactly `amount_in` of the first token for as much of the last
    /// token as the route yields.
    ///
    /// Returns the amount moving through every hop.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InsufficientOutputAmount`] if the output would fall
    ///   below `amount_out_min`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_exact_tokens_for_tokens<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_in: U256,
        amount_out_min: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        let amounts = get_amounts_out(registry, amount_in, path)?;
        if amounts[amounts.len() - 1] < amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            tx.ledger().transfer_from(
                path[0],
                self.address,
                ctx.caller(),
                first.address(),
                amounts[0],
            )?;
            self.swap_along(ctx, registry, tx, &amounts, path, route.to())?;
            Ok(amounts)
        })
    }

    /// Swaps as little of the first token as needed for exactly
    /// `amount_out` of the last token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::ExcessiveInputAmount`] if the input would exceed
    ///   `amount_in_max`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_tokens_for_exact_tokens<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_out: U256,
        amount_in_max: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        let amounts = get_amounts_in(registry, amount_out, path)?;
        if amounts[0] > amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            tx.ledger().transfer_from(
                path[0],
                self.address,
                ctx.caller(),
                first.address(),
                amounts[0],
            )?;
            self.swap_along(ctx, registry, tx, &amounts, path, route.to())?;
            Ok(amounts)
        })
    }

    /// Swaps exactly `amount_in` of native currency, wrapped, for as much
    /// of the last token as the route yields.  The route must start at the
    /// wrapped native token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InvalidPath`] if the route does not start at the
    ///   wrapped native token.
    /// - [`AmmError::InsufficientOutputAmount`] if the output would fall
    ///   below `amount_out_min`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_exact_native_for_tokens<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_in: U256,
        amount_out_min: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        self.require_wrapped(route.token_in())?;
        let amounts = get_amounts_out(registry, amount_in, path)?;
        if amounts[amounts.len() - 1] < amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            self.wrap_into(ctx, tx, first.address(), amounts[0], amounts[0])?;
            self.swap_along(ctx, registry, tx, &amounts, path, route.to())?;
            Ok(amounts)
        })
    }

    /// Swaps as little of the first token as needed for exactly
    /// `amount_out` of native currency.  The route must end at the wrapped
    /// native token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InvalidPath`] if the route does not end at the
    ///   wrapped native token.
    /// - [`AmmError::ExcessiveInputAmount`] if the input would exceed
    ///   `amount_in_max`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_tokens_for_exact_native<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_out: U256,
        amount_in_max: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        self.require_wrapped(route.token_out())?;
        let amounts = get_amounts_in(registry, amount_out, path)?;
        if amounts[0] > amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            tx.ledger().transfer_from(
                path[0],
                self.address,
                ctx.caller(),
                first.address(),
                amounts[0],
            )?;
            self.swap_along(ctx, registry, tx, &amounts, path, self.address)?;
            self.unwrap_to(tx, route.to(), amounts[amounts.len() - 1])?;
            Ok(amounts)
        })
    }

    /// Swaps exactly `amount_in` of the first token for as much native
    /// currency as the route yields.  The route must end at the wrapped
    /// native token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InvalidPath`] if the route does not end at the
    ///   wrapped native token.
    /// - [`AmmError::InsufficientOutputAmount`] if the output would fall
    ///   below `amount_out_min`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_exact_tokens_for_native<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_in: U256,
        amount_out_min: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        self.require_wrapped(route.token_out())?;
        let amounts = get_amounts_out(registry, amount_in, path)?;
        if amounts[amounts.len() - 1] < amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            tx.ledger().transfer_from(
                path[0],
                self.address,
                ctx.caller(),
                first.address(),
                amounts[0],
            )?;
            self.swap_along(ctx, registry, tx, &amounts, path, self.address)?;
            self.unwrap_to(tx, route.to(), amounts[amounts.len() - 1])?;
            Ok(amounts)
        })
    }

    /// Spends as little native currency as needed, out of at most
    /// `amount_in_max`, for exactly `amount_out` of the last token.  The
    /// unspent remainder is returned to the caller.  The route must start
    /// at the wrapped native token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InvalidPath`] if the route does not start at the
    ///   wrapped native token.
    /// - [`AmmError::ExcessiveInputAmount`] if the input would exceed
    ///   `amount_in_max`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_native_for_exact_tokens<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_out: U256,
        amount_in_max: U256,
        route: &Route,
    ) -> Result<Vec<U256>, AmmError>
    where
        L: WrappedNative + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        self.require_wrapped(route.token_in())?;
        let amounts = get_amounts_in(registry, amount_out, path)?;
        if amounts[0] > amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            self.wrap_into(ctx, tx, first.address(), amount_in_max, amounts[0])?;
            self.swap_along(ctx, registry, tx, &amounts, path, route.to())?;
            Ok(amounts)
        })
    }

    /// Swaps exactly `amount_in` of the first token along the route,
    /// pricing every hop from what its pair actually received.
    ///
    /// Use this for tokens that take a fee on transfer: the precomputed
    /// amounts of [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens)
    /// would overstate what reaches each pair.  The slippage check is made
    /// on the recipient's balance change.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past the route's deadline.
    /// - [`AmmError::InsufficientOutputAmount`] if `to` gains less than
    ///   `amount_out_min`.
    /// - Any pricing, ledger, or pair error.
    pub fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        ledger: &mut L,
        amount_in: U256,
        amount_out_min: U256,
        route: &Route,
    ) -> Result<(), AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        Self::ensure(ctx, route.deadline())?;
        let path = route.path();
        let (token_out, to) = (route.token_out(), route.to());
        Transaction::run(ctx, ledger, |ctx, tx| {
            let first = pair_for(registry, path[0], path[1])?;
            tx.ledger().transfer_from(
                path[0],
                self.address,
                ctx.caller(),
                first.address(),
                amount_in,
            )?;
            let before = tx.ledger().balance_of(token_out, to);
            self.swap_along_supporting_fee(ctx, registry, tx, path, to)?;
            let received = tx.ledger().balance_of(token_out, to).saturating_sub(before);
            if received < amount_out_min {
                return Err(AmmError::InsufficientOutputAmount);
            }
            Ok(())
        })
    }

    /// Takes `sent` native currency from the caller, wraps `used` of it
    /// into `pair`, and refunds the rest.
    pub(super) fn wrap_into<L: WrappedNative + Clone>(
        &self,
        ctx: &CallContext,
        tx: &mut Transaction<L>,
        pair: Address,
        sent: U256,
        used: U256,
    ) -> Result<(), AmmError> {
        let caller = ctx.caller();
        let wrapped = self.wrapped_native;
        let ledger = tx.ledger();
        ledger.transfer_native(caller, self.address, sent)?;
        ledger.deposit(self.address, used)?;
        ledger.transfer(wrapped, self.address, pair, used)?;
        if sent > used {
            ledger.transfer_native(self.address, caller, sent - used)?;
        }
        Ok(())
    }

    /// Unwraps `amount` held by the router and sends it to `to` as native
    /// currency.
    pub(super) fn unwrap_to<L: WrappedNative + Clone>(
        &self,
        tx: &mut Transaction<L>,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError> {
        let ledger = tx.ledger();
        ledger.withdraw(self.address, amount)?;
        ledger.transfer_native(self.address, to, amount)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::router::fixture::{ADMIN, BOB, ROUTER, TOKEN_A, TOKEN_B, TOKEN_C, WETH, env, ether};
    use crate::router::get_amount_out;

    fn route(path: Vec<Address>, to: Address) -> Route {
        let Ok(route) = Route::new(path, to, 200) else {
            panic!("valid route");
        };
        route
    }

    // -- exact input ----------------------------------------------------------

    #[test]
    fn exact_tokens_for_tokens_single_hop() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        let route = route(vec![TOKEN_A, TOKEN_B], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        let expected = U256::from(906_610_893_880_149_131u64);
        assert_eq!(result, Ok(vec![ether(1), expected]));
        assert_eq!(env.ledger.balance_of(TOKEN_B, BOB), expected);
        assert_eq!(env.ledger.balance_of(TOKEN_A, ADMIN), ether(989));
    }

    #[test]
    fn exact_tokens_for_tokens_multi_hop() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        env.seed(TOKEN_B, TOKEN_C, ether(10), ether(10));
        let Ok(quoted) = get_amounts_out(&env.registry, ether(1), &[TOKEN_A, TOKEN_B, TOKEN_C])
        else {
            panic!("quote");
        };

        let route = route(vec![TOKEN_A, TOKEN_B, TOKEN_C], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result.as_ref(), Ok(&quoted));
        assert_eq!(env.ledger.balance_of(TOKEN_C, BOB), quoted[2]);
        assert_eq!(env.ledger.balance_of(TOKEN_B, BOB), U256::ZERO);
        assert_eq!(env.ledger.balance_of(TOKEN_B, ROUTER), U256::ZERO);
    }

    #[test]
    fn exact_tokens_for_tokens_enforces_minimum() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        let before = env.ledger.clone();
        let route = route(vec![TOKEN_A, TOKEN_B], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::from(906_610_893_880_149_132u64),
            &route,
        );
        assert_eq!(result, Err(AmmError::InsufficientOutputAmount));
        assert_eq!(env.ledger, before);
    }

    #[test]
    fn expired_route_is_rejected() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        env.ctx.set_timestamp(201);
        let route = route(vec![TOKEN_A, TOKEN_B], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result, Err(AmmError::Expired));
    }

    #[test]
    fn missing_hop_is_reported() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        let route = route(vec![TOKEN_A, TOKEN_C], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result, Err(AmmError::PairNotFound));
    }

    #[test]
    fn failing_later_hop_rolls_back_earlier_hops() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        env.seed(TOKEN_B, TOKEN_C, ether(10), ether(10));
        let Ok(()) = env.ledger.set_transfer_fee(TOKEN_B, 100) else {
            panic!("fee");
        };
        let Some(first) = env.registry.get_pair(TOKEN_A, TOKEN_B) else {
            panic!("pair");
        };
        let reserves = first.get_reserves();
        let before = env.ledger.clone();

        let route = route(vec![TOKEN_A, TOKEN_B, TOKEN_C], BOB);
        let result = env.router.swap_exact_tokens_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result, Err(AmmError::K));
        assert_eq!(first.get_reserves(), reserves);
        assert_eq!(env.ledger, before);
        assert!(env.ctx.events().is_empty());
    }

    // -- exact output ---------------------------------------------------------

    #[test]
    fn tokens_for_exact_tokens_pulls_quoted_input() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(5), ether(10));
        let Ok(quoted) = get_amounts_in(&env.registry, ether(1), &[TOKEN_A, TOKEN_B]) else {
            panic!("quote");
        };
        let route = route(vec![TOKEN_A, TOKEN_B], BOB);

        let result = env.router.swap_tokens_for_exact_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            quoted[0] - U256::from(1u8),
            &route,
        );
        assert_eq!(result, Err(AmmError::ExcessiveInputAmount));

        let result = env.router.swap_tokens_for_exact_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            quoted[0],
            &route,
        );
        assert_eq!(result.as_ref(), Ok(&quoted));
        assert_eq!(env.ledger.balance_of(TOKEN_B, BOB), ether(1));
        assert_eq!(env.ledger.balance_of(TOKEN_A, ADMIN), ether(995) - quoted[0]);
    }

    // -- native ---------------------------------------------------------------

    #[test]
    fn exact_native_for_tokens_wraps_input() {
        let mut env = env();
        env.seed_native(TOKEN_A, ether(10), ether(10));
        let route = route(vec![WETH, TOKEN_A], BOB);
        let result = env.router.swap_exact_native_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        let expected = U256::from(906_610_893_880_149_131u64);
        assert_eq!(result, Ok(vec![ether(1), expected]));
        assert_eq!(env.ledger.balance_of(TOKEN_A, BOB), expected);
        assert_eq!(env.ledger.native_balance(ADMIN), ether(989));
        assert_eq!(env.ledger.native_balance(ROUTER), U256::ZERO);
    }

    #[test]
    fn native_routes_must_use_wrapped_token() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        let route = route(vec![TOKEN_A, TOKEN_B], BOB);
        let result = env.router.swap_exact_native_for_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result, Err(AmmError::InvalidPath));
        let result = env.router.swap_exact_tokens_for_native(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        assert_eq!(result, Err(AmmError::InvalidPath));
    }

    #[test]
    fn exact_tokens_for_native_unwraps_output() {
        let mut env = env();
        env.seed_native(TOKEN_A, ether(10), ether(10));
        let route = route(vec![TOKEN_A, WETH], BOB);
        let result = env.router.swap_exact_tokens_for_native(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            U256::ZERO,
            &route,
        );
        let expected = U256::from(906_610_893_880_149_131u64);
        assert_eq!(result, Ok(vec![ether(1), expected]));
        assert_eq!(env.ledger.native_balance(BOB), expected);
        assert_eq!(env.ledger.balance_of(WETH, ROUTER), U256::ZERO);
    }

    #[test]
    fn tokens_for_exact_native_unwraps_output() {
        let mut env = env();
        env.seed_native(TOKEN_A, ether(10), ether(10));
        let route = route(vec![TOKEN_A, WETH], BOB);
        let Ok(amounts) = env.router.swap_tokens_for_exact_native(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            ether(2),
            &route,
        ) else {
            panic!("swap");
        };
        assert_eq!(amounts[1], ether(1));
        assert_eq!(env.ledger.native_balance(BOB), ether(1));
        assert_eq!(env.ledger.balance_of(TOKEN_A, ADMIN), ether(990) - amounts[0]);
    }

    #[test]
    fn native_for_exact_tokens_refunds_excess() {
        let mut env = env();
        env.seed_native(TOKEN_A, ether(10), ether(10));
        let route = route(vec![WETH, TOKEN_A], BOB);
        let Ok(amounts) = env.router.swap_native_for_exact_tokens(
            &mut env.ctx,
            &env.registry,
            &mut env.ledger,
            ether(1),
            ether(5),
            &route,
        ) else {
            panic!("swap");
        };
        assert_eq!(env.ledger.balance_of(TOKEN_A, BOB), ether(1));
        assert_eq!(env.ledger.native_balance(ADMIN), ether(990) - amounts[0]);
        assert_eq!(env.ledger.native_balance(ROUTER), U256::ZERO);
    }

    // -- fee-on-transfer ------------------------------------------------------

    #[test]
    fn supporting_fee_on_transfer_prices_received_amounts() {
        let mut env = env();
        env.seed(TOKEN_A, TOKEN_B, ether(10), ether(10));
        env.seed(TOKEN_B, TOKEN_C, ether(10), ether(10));
        let Ok(()) = env.ledger.set_transfer_fee(TOKEN_B, 100) else {
            panic!("fee");
        };
        let Ok(quoted) = get_amounts_out(&env.registry, ether(1), &[TOKEN_A, TOKEN_B, TOKEN_C])
        else {
            panic!("quote");
        };
        let path = vec![TOKEN_A, TOKEN_B, TOKEN_C];

        let result = env
            .router
            .swap_exact_tokens_for_tokens_supporting_fee_on_transfer(
                &mut env.ctx,
                &env.registry,
                &mut env.ledger,
                ether(1),
                quoted[2],
                &route(path.clone(), BOB),
            );
        assert_eq!(result, Err(AmmError::InsufficientOutputAmount));

        let result = env
            .router
            .swap_exact_tokens_for_tokens_supporting_fee_on_transfer(
                &mut env.ctx,
                &env.registry,
                &mut env.ledger,
                ether(1),
                U256::ZERO,
                &route(path, BOB),
            );
        assert_eq!(result, Ok(()));
        let received_b = quoted[1] - quoted[1] / U256::from(100u8);
        let Ok(expected) = get_amount_out(received_b, ether(10), ether(10)) else {
            panic!("expected");
        };
        assert_eq!(env.ledger.balance_of(TOKEN_C, BOB), expected);
    }
}
