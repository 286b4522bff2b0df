//! Multi-step trading and liquidity operations over registered pairs.
//!
//! The [`library`] functions price trades without touching any state.  The
//! [`Router`] builds on them: it pulls the caller's tokens, pays the first
//! pair, chains every hop's output into the next pair, and enforces the
//! caller's slippage limits and deadline.
//!
//! Every router operation is all-or-nothing.  Ledger writes are staged,
//! touched pairs are checkpointed, and a pair created on the way is
//! forgotten again, so a failure leaves no trace in the ledger, the pairs,
//! the registry, or the event log.
//!
//! # Permissions
//!
//! The router acts under its own address.  Callers approve it as spender
//! on the input tokens (and on pair shares before removing liquidity).
//! To let [`Router::add_liquidity`] create missing pairs, grant the router
//! [`Role::PairCreator`](crate::domain::Role::PairCreator).

#[cfg(test)]
mod fixture;
pub mod library;
mod liquidity;
mod swap;

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use crate::config::RouterConfig;
use crate::domain::CallContext;
use crate::error::AmmError;
use crate::factory::PairRegistry;
use crate::pair::{Pair, Transaction};
use crate::traits::{FromConfig, PairAddressDeriver, TokenLedger};

pub use library::{
    get_amount_in, get_amount_out, get_amounts_in, get_amounts_out, get_reserves, pair_for, quote,
    sort_tokens,
};

/// Stateless orchestrator of swaps and liquidity changes.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::{U256, address};
/// use pairswap::config::{RegistryConfig, RouterConfig};
/// use pairswap::domain::{AddLiquidity, CallContext, Role, Route};
/// use pairswap::factory::PairRegistry;
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::router::Router;
/// use pairswap::traits::TokenLedger;
///
/// let admin = address!("0x000000000000000000000000000000000000ad01");
/// let token_a = address!("0x1000000000000000000000000000000000000000");
/// let token_b = address!("0x2000000000000000000000000000000000000000");
/// let weth = address!("0x000000000000000000000000000000000000eeee");
///
/// let router = Router::new(&RouterConfig::new(
///     address!("0x0000000000000000000000000000000000000777"),
///     weth,
/// ).expect("valid router config")).expect("router");
/// let mut registry = PairRegistry::new(&RegistryConfig::new(
///     address!("0x00000000000000000000000000000000000000ff"),
///     admin,
/// ).expect("valid registry config")).expect("registry");
///
/// let mut ctx = CallContext::new(admin, 100);
/// registry
///     .grant_role(&mut ctx, Role::PairCreator, router.address())
///     .expect("admin may grant");
///
/// let one = U256::from(1_000_000_000_000_000_000u64);
/// let mut ledger = InMemoryLedger::new(weth);
/// for token in [token_a, token_b] {
///     ledger.mint(token, admin, one * U256::from(100u8)).expect("fund");
///     ledger.approve(token, admin, router.address(), U256::MAX);
/// }
///
/// router
///     .add_liquidity(&mut ctx, &mut registry, &mut ledger, &AddLiquidity {
///         token_a,
///         token_b,
///         amount_a_desired: one * U256::from(10u8),
///         amount_b_desired: one * U256::from(10u8),
///         amount_a_min: U256::ZERO,
///         amount_b_min: U256::ZERO,
///         to: admin,
///         deadline: 200,
///     })
///     .expect("liquidity added");
///
/// let route = Route::new(vec![token_a, token_b], admin, 200).expect("route");
/// let amounts = router
///     .swap_exact_tokens_for_tokens(&mut ctx, &registry, &mut ledger, one, U256::ZERO, &route)
///     .expect("swapped");
/// assert_eq!(amounts[0], one);
/// assert_eq!(amounts[1], U256::from(906_610_893_880_149_131u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Router {
    address: Address,
    wrapped_native: Address,
}

impl Router {
    /// Creates a router from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: &RouterConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            wrapped_native: config.wrapped_native(),
        })
    }

    /// The router's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The wrapped native token.
    #[must_use]
    pub const fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    fn ensure(ctx: &CallContext, deadline: u64) -> Result<(), AmmError> {
        if ctx.timestamp() > deadline {
            return Err(AmmError::Expired);
        }
        Ok(())
    }

    fn require_wrapped(&self, token: Address) -> Result<(), AmmError> {
        if token == self.wrapped_native {
            Ok(())
        } else {
            Err(AmmError::InvalidPath)
        }
    }

    /// Executes the swaps for precomputed `amounts` along `path`.  The
    /// first pair must already hold `amounts[0]` of `path[0]`.
    fn swap_along<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        tx: &mut Transaction<L>,
        amounts: &[U256],
        path: &[Address],
        to: Address,
    ) -> Result<(), AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        for (i, hop) in path.windows(2).enumerate() {
            let (input, output) = (hop[0], hop[1]);
            let pair = pair_for(registry, input, output)?;
            let recipient = hop_recipient(registry, output, path.get(i + 2).copied(), to)?;
            self.swap_hop(ctx, tx, &pair, input, amounts[i + 1], recipient)?;
        }
        Ok(())
    }

    /// Like [`swap_along`](Self::swap_along), but derives every hop's
    /// input from what the pair actually received.
    fn swap_along_supporting_fee<L, D>(
        &self,
        ctx: &mut CallContext,
        registry: &PairRegistry<D>,
        tx: &mut Transaction<L>,
        path: &[Address],
        to: Address,
    ) -> Result<(), AmmError>
    where
        L: TokenLedger + Clone,
        D: PairAddressDeriver,
    {
        for (i, hop) in path.windows(2).enumerate() {
            let (input, output) = (hop[0], hop[1]);
            let pair = pair_for(registry, input, output)?;
            let (reserve_input, reserve_output) = pair
                .get_reserves()
                .oriented(pair.token0(), pair.token1(), input)?;
            let received = tx.ledger().balance_of(input, pair.address());
            let amount_input = received
                .checked_sub(reserve_input)
                .ok_or(AmmError::InsufficientInputAmount)?;
            let amount_out = get_amount_out(amount_input, reserve_input, reserve_output)?;
            let recipient = hop_recipient(registry, output, path.get(i + 2).copied(), to)?;
            self.swap_hop(ctx, tx, &pair, input, amount_out, recipient)?;
        }
        Ok(())
    }

    fn swap_hop<L: TokenLedger + Clone>(
        &self,
        ctx: &mut CallContext,
        tx: &mut Transaction<L>,
        pair: &Arc<Pair>,
        input: Address,
        amount_out: U256,
        recipient: Address,
    ) -> Result<(), AmmError> {
        let (amount0_out, amount1_out) = if input == pair.token0() {
            (U256::ZERO, amount_out)
        } else {
            (amount_out, U256::ZERO)
        };
        tx.touch(pair);
        ctx.as_caller(self.address, |ctx| {
            pair.swap(ctx, tx.ledger(), amount0_out, amount1_out, recipient, None)
        })
    }
}

/// Where a hop's output goes: the next pair on the path, or `to` after the
/// last hop.
fn hop_recipient<D: PairAddressDeriver>(
    registry: &PairRegistry<D>,
    output: Address,
    next: Option<Address>,
    to: Address,
) -> Result<Address, AmmError> {
    match next {
        Some(next) => Ok(pair_for(registry, output, next)?.address()),
        None => Ok(to),
    }
}

impl FromConfig<RouterConfig> for Router {
    fn from_config(config: &RouterConfig) -> Result<Self, AmmError> {
        Self::new(config)
    }
}
