//! The reserve pair: a constant-product pool over two tokens.
//!
//! A pair never pulls tokens.  Callers transfer tokens to the pair's
//! address on the ledger first and then invoke [`Pair::mint`],
//! [`Pair::swap`], or [`Pair::sync`]; the pair compares its actual
//! balances with its cached reserves to find out what it received.
//!
//! # Swap Invariant
//!
//! With a 0.3% fee charged on the input side:
//!
//! ```text
//! (balance0·1000 − amount0_in·3) · (balance1·1000 − amount1_in·3)
//!     ≥ reserve0 · reserve1 · 1000²
//! ```
//!
//! Outputs are sent before the check, which is what makes flash swaps
//! possible.  A failed check discards every token movement of the call,
//! along with whatever the flash-swap callee did inside the swap's
//! [`Transaction`].

use alloy_primitives::{Address, U256};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::lock::ReentrancyGuard;
use super::state::PairState;
use super::transaction::Transaction;
use crate::domain::{CallContext, Event, Reserves, TokenPair};
use crate::error::AmmError;
use crate::factory::FeeRecipient;
use crate::math::{CheckedArithmetic, isqrt};
use crate::traits::{FeeConfig, SwapCallee, TokenLedger};

/// Shares permanently locked at the zero address by the first mint.
pub const MINIMUM_LIQUIDITY: U256 = U256::from_limbs([1_000, 0, 0, 0]);

/// Fee denominator: the swap fee is `FEE_NUMERATOR / FEE_DENOMINATOR`.
const FEE_DENOMINATOR: U256 = U256::from_limbs([1_000, 0, 0, 0]);

/// 3 / 1000 = 0.3%.
const FEE_NUMERATOR: U256 = U256::from_limbs([3, 0, 0, 0]);

/// A flash-swap request: the callee to invoke once outputs are sent, and
/// the opaque payload forwarded to it.
pub struct FlashSwap<'a, L> {
    /// Receives control between sending outputs and checking the invariant.
    pub callee: &'a mut dyn SwapCallee<L>,
    /// Forwarded untouched to [`SwapCallee::on_swap`].
    pub data: &'a [u8],
}

impl<L> core::fmt::Debug for FlashSwap<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlashSwap")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// A constant-product pair of two tokens.
///
/// Pairs are created by the [`PairRegistry`](crate::factory::PairRegistry)
/// and shared as `Arc<Pair>`; every method takes `&self`.  Each mutating
/// operation holds the pair's reentrancy lock for its whole duration, so a
/// flash-swap callee that calls back into the same pair gets
/// [`AmmError::Locked`].
///
/// The pair is also the ledger of its own share token, addressed by
/// [`Pair::address`].
///
/// Whether the protocol fee applies is read from the pair's
/// [`FeeRecipient`], shared with the registry that created it.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::{U256, address};
/// use pairswap::domain::{CallContext, TokenPair};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::pair::Pair;
/// use pairswap::traits::TokenLedger;
///
/// let token_a = address!("0x1000000000000000000000000000000000000000");
/// let token_b = address!("0x2000000000000000000000000000000000000000");
/// let alice = address!("0x00000000000000000000000000000000000a11ce");
/// let pair_address = address!("0x00000000000000000000000000000000000000aa");
///
/// let tokens = TokenPair::new(token_a, token_b).expect("distinct tokens");
/// let pair = Pair::new(pair_address, Default::default(), tokens);
///
/// let mut ledger = InMemoryLedger::default();
/// let one = U256::from(1_000_000_000_000_000_000u64);
/// ledger.mint(token_a, pair_address, one).expect("fund");
/// ledger.mint(token_b, pair_address, one * U256::from(4u8)).expect("fund");
///
/// let mut ctx = CallContext::new(alice, 1);
/// let liquidity = pair.mint(&mut ctx, &ledger, alice).expect("mint");
///
/// assert_eq!(pair.total_supply(), one * U256::from(2u8));
/// assert_eq!(liquidity, one * U256::from(2u8) - U256::from(1_000u16));
/// ```
#[derive(Debug)]
pub struct Pair {
    address: Address,
    factory: Address,
    tokens: TokenPair,
    fees: FeeRecipient,
    guard: ReentrancyGuard,
    state: Mutex<PairState>,
}

impl Pair {
    /// Creates an empty pair at `address`, owned by `factory`, with a
    /// fee switch of its own that starts off.
    #[must_use]
    pub fn new(address: Address, factory: Address, tokens: TokenPair) -> Self {
        Self::with_fee_recipient(address, factory, tokens, FeeRecipient::new())
    }

    /// Creates an empty pair that reads the protocol-fee recipient from
    /// `fees`.
    #[must_use]
    pub fn with_fee_recipient(
        address: Address,
        factory: Address,
        tokens: TokenPair,
        fees: FeeRecipient,
    ) -> Self {
        Self {
            address,
            factory,
            tokens,
            fees,
            guard: ReentrancyGuard::new(),
            state: Mutex::new(PairState::default()),
        }
    }

    /// The pair's own address, which is also its share token's address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The registry that created this pair.
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.factory
    }

    /// The sorted token pair.
    #[must_use]
    pub const fn tokens(&self) -> TokenPair {
        self.tokens
    }

    /// The lower-sorting token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.tokens.token0()
    }

    /// The higher-sorting token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.tokens.token1()
    }

    /// The current protocol-fee recipient, `None` while the fee is off.
    #[must_use]
    pub fn fee_to(&self) -> Option<Address> {
        self.fees.fee_to()
    }

    /// Cached reserves and the timestamp of their last update.
    #[must_use]
    pub fn get_reserves(&self) -> Reserves {
        self.state.lock().reserves()
    }

    /// Accumulated price of `token0` in `token1`, UQ112x112 times seconds.
    #[must_use]
    pub fn price0_cumulative_last(&self) -> U256 {
        self.state.lock().price0_cumulative_last
    }

    /// Accumulated price of `token1` in `token0`, UQ112x112 times seconds.
    #[must_use]
    pub fn price1_cumulative_last(&self) -> U256 {
        self.state.lock().price1_cumulative_last
    }

    /// `reserve0 * reserve1` as of the last liquidity event while the
    /// protocol fee was on; zero otherwise.
    #[must_use]
    pub fn k_last(&self) -> U256 {
        self.state.lock().k_last
    }

    /// Total outstanding shares.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.state.lock().total_supply
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.state.lock().balance_of(owner)
    }

    /// Shares `spender` may move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state.lock().allowance(owner, spender)
    }

    /// Returns `true` while a mutating operation is in flight.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.guard.is_locked()
    }

    pub(crate) fn checkpoint(&self) -> PairState {
        self.state.lock().clone()
    }

    pub(crate) fn restore(&self, state: PairState) {
        *self.state.lock() = state;
    }

    fn balances<L: TokenLedger + ?Sized>(&self, ledger: &L) -> (U256, U256) {
        (
            ledger.balance_of(self.token0(), self.address),
            ledger.balance_of(self.token1(), self.address),
        )
    }

    fn sync_event(&self, state: &PairState) -> Event {
        Event::Sync {
            pair: self.address,
            reserve0: state.reserve0,
            reserve1: state.reserve1,
        }
    }

    // -- share token ----------------------------------------------------------

    /// Lets `spender` move up to `value` of the caller's shares.
    pub fn approve(&self, ctx: &mut CallContext, spender: Address, value: U256) {
        let owner = ctx.caller();
        self.state.lock().set_allowance(owner, spender, value);
        ctx.emit(Event::Approval {
            token: self.address,
            owner,
            spender,
            value,
        });
    }

    /// Moves `value` shares from the caller to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if the caller holds fewer
    /// than `value` shares.
    pub fn transfer(
        &self,
        ctx: &mut CallContext,
        to: Address,
        value: U256,
    ) -> Result<(), AmmError> {
        let mut events = Vec::with_capacity(1);
        self.state
            .lock()
            .move_shares(self.address, ctx.caller(), to, value, &mut events)?;
        ctx.emit_all(events);
        Ok(())
    }

    /// Moves `value` shares from `from` to `to` using the caller's
    /// allowance.  An allowance of `U256::MAX` is never decremented.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientAllowance`] or
    /// [`AmmError::InsufficientBalance`].
    pub fn transfer_from(
        &self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), AmmError> {
        let spender = ctx.caller();
        let mut state = self.state.lock();
        let mut next = state.clone();
        let allowed = next.allowance(from, spender);
        if allowed != U256::MAX {
            let remaining = allowed
                .checked_sub(value)
                .ok_or(AmmError::InsufficientAllowance)?;
            next.set_allowance(from, spender, remaining);
        }
        let mut events = Vec::with_capacity(1);
        next.move_shares(self.address, from, to, value, &mut events)?;
        *state = next;
        drop(state);
        ctx.emit_all(events);
        Ok(())
    }

    // -- liquidity ------------------------------------------------------------

    /// Mints shares to `to` for the tokens sent to the pair since the last
    /// reserve update.
    ///
    /// The first mint locks [`MINIMUM_LIQUIDITY`] shares at the zero
    /// address.  While the protocol fee is on, its cut of fee growth is
    /// minted to the recipient before the new shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on re-entry.
    /// - [`AmmError::InsufficientLiquidityMinted`] if the deposit is worth
    ///   zero shares (or, on the first mint, no more than the locked
    ///   minimum).
    /// - [`AmmError::Underflow`] if a balance is below its reserve.
    /// - [`AmmError::Overflow`] if a new reserve exceeds 112 bits.
    pub fn mint<L: TokenLedger + ?Sized>(
        &self,
        ctx: &mut CallContext,
        ledger: &L,
        to: Address,
    ) -> Result<U256, AmmError> {
        let _entered = self.guard.enter()?;
        let mut state = self.state.lock();
        let mut next = state.clone();
        let mut events = Vec::new();

        let (balance0, balance1) = self.balances(ledger);
        let amount0 = balance0.safe_sub(next.reserve0, "amount0 deposited")?;
        let amount1 = balance1.safe_sub(next.reserve1, "amount1 deposited")?;

        let fee_on = next.mint_fee(self.address, self.fees.fee_to(), &mut events)?;
        let total_supply = next.total_supply;
        let liquidity = if total_supply.is_zero() {
            let root = isqrt(amount0.safe_mul(amount1, "initial deposit")?);
            let liquidity = root
                .checked_sub(MINIMUM_LIQUIDITY)
                .ok_or(AmmError::InsufficientLiquidityMinted)?;
            next.mint_shares(self.address, Address::ZERO, MINIMUM_LIQUIDITY, &mut events)?;
            liquidity
        } else {
            let by0 = amount0
                .safe_mul(total_supply, "liquidity from amount0")?
                .safe_div(next.reserve0)?;
            let by1 = amount1
                .safe_mul(total_supply, "liquidity from amount1")?
                .safe_div(next.reserve1)?;
            by0.min(by1)
        };
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        next.mint_shares(self.address, to, liquidity, &mut events)?;

        next.update(balance0, balance1, ctx.timestamp_u32())?;
        if fee_on {
            next.k_last = next.k()?;
        }
        events.push(self.sync_event(&next));
        events.push(Event::Mint {
            pair: self.address,
            sender: ctx.caller(),
            amount0,
            amount1,
        });
        *state = next;
        drop(state);

        debug!(pair = %self.address, %to, %amount0, %amount1, %liquidity, "mint");
        ctx.emit_all(events);
        Ok(liquidity)
    }

    /// Burns the shares held by the pair itself and sends the matching
    /// share of both reserves to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on re-entry.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    /// - Any ledger error from the outbound transfers.
    pub fn burn<L: TokenLedger + Clone>(
        &self,
        ctx: &mut CallContext,
        ledger: &mut L,
        to: Address,
    ) -> Result<(U256, U256), AmmError> {
        let _entered = self.guard.enter()?;
        let mut state = self.state.lock();
        let mut next = state.clone();
        let mut events = Vec::new();
        let mut staged = ledger.clone();

        let (balance0, balance1) = self.balances(&staged);
        let liquidity = next.balance_of(self.address);

        let fee_on = next.mint_fee(self.address, self.fees.fee_to(), &mut events)?;
        let total_supply = next.total_supply;
        let amount0 = liquidity
            .safe_mul(balance0, "burn amount0")?
            .safe_div(total_supply)?;
        let amount1 = liquidity
            .safe_mul(balance1, "burn amount1")?
            .safe_div(total_supply)?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        next.burn_shares(self.address, self.address, liquidity, &mut events)?;
        staged.transfer(self.token0(), self.address, to, amount0)?;
        staged.transfer(self.token1(), self.address, to, amount1)?;

        let (balance0, balance1) = self.balances(&staged);
        next.update(balance0, balance1, ctx.timestamp_u32())?;
        if fee_on {
            next.k_last = next.k()?;
        }
        events.push(self.sync_event(&next));
        events.push(Event::Burn {
            pair: self.address,
            sender: ctx.caller(),
            amount0,
            amount1,
            to,
        });
        *state = next;
        drop(state);
        *ledger = staged;

        debug!(pair = %self.address, %to, %amount0, %amount1, %liquidity, "burn");
        ctx.emit_all(events);
        Ok((amount0, amount1))
    }

    // -- trading --------------------------------------------------------------

    /// Sends `amount0_out` / `amount1_out` to `to`, runs the optional
    /// flash-swap callee, then checks that the pair was paid enough input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on re-entry.
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] if an output reaches its
    ///   reserve.
    /// - [`AmmError::InvalidTo`] if `to` is one of the pair's tokens.
    /// - [`AmmError::InsufficientInputAmount`] if nothing was paid in.
    /// - [`AmmError::K`] if the fee-adjusted invariant would shrink.
    /// - Any error raised by the callee or the ledger.
    ///
    /// On error the ledger, the event log, and every pair the callee
    /// touched are left as they were.
    pub fn swap<L>(
        &self,
        ctx: &mut CallContext,
        ledger: &mut L,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
        flash: Option<FlashSwap<'_, L>>,
    ) -> Result<(), AmmError>
    where
        L: TokenLedger + Clone,
    {
        let _entered = self.guard.enter()?;
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let reserves = self.get_reserves();
        if amount0_out >= reserves.reserve0 || amount1_out >= reserves.reserve1 {
            return Err(AmmError::InsufficientLiquidity);
        }
        if self.tokens.contains(to) {
            return Err(AmmError::InvalidTo);
        }

        Transaction::run(ctx, ledger, |ctx, tx| {
            self.settle_swap(ctx, tx, reserves, [amount0_out, amount1_out], to, flash)
        })
    }

    fn settle_swap<L: TokenLedger + Clone>(
        &self,
        ctx: &mut CallContext,
        tx: &mut Transaction<L>,
        reserves: Reserves,
        amounts_out: [U256; 2],
        to: Address,
        flash: Option<FlashSwap<'_, L>>,
    ) -> Result<(), AmmError> {
        let [amount0_out, amount1_out] = amounts_out;
        let sender = ctx.caller();
        if !amount0_out.is_zero() {
            tx.ledger()
                .transfer(self.token0(), self.address, to, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            tx.ledger()
                .transfer(self.token1(), self.address, to, amount1_out)?;
        }
        if let Some(FlashSwap { callee, data }) = flash {
            callee.on_swap(ctx, tx, sender, amount0_out, amount1_out, data)?;
        }

        let (balance0, balance1) = self.balances(&*tx.ledger());
        let amount0_in = amount_in(balance0, reserves.reserve0, amount0_out);
        let amount1_in = amount_in(balance1, reserves.reserve1, amount1_out);
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let adjusted0 = balance0
            .safe_mul(FEE_DENOMINATOR, "adjusted balance0")?
            .safe_sub(amount0_in.safe_mul(FEE_NUMERATOR, "fee0")?, "adjusted balance0")?;
        let adjusted1 = balance1
            .safe_mul(FEE_DENOMINATOR, "adjusted balance1")?
            .safe_sub(amount1_in.safe_mul(FEE_NUMERATOR, "fee1")?, "adjusted balance1")?;
        let required = reserves
            .reserve0
            .safe_mul(reserves.reserve1, "reserve product")?
            .safe_mul(FEE_DENOMINATOR * FEE_DENOMINATOR, "scaled reserve product")?;
        if adjusted0.safe_mul(adjusted1, "adjusted product")? < required {
            warn!(
                pair = %self.address,
                %amount0_in,
                %amount1_in,
                %amount0_out,
                %amount1_out,
                "swap rejected by invariant"
            );
            return Err(AmmError::K);
        }

        let mut state = self.state.lock();
        state.update(balance0, balance1, ctx.timestamp_u32())?;
        let sync = self.sync_event(&state);
        drop(state);

        debug!(
            pair = %self.address,
            %to,
            %amount0_in,
            %amount1_in,
            %amount0_out,
            %amount1_out,
            "swap"
        );
        ctx.emit(sync);
        ctx.emit(Event::Swap {
            pair: self.address,
            sender,
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            to,
        });
        Ok(())
    }

    /// Sends any balance above the reserves to `to`, leaving reserves and
    /// accumulators untouched.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on re-entry.
    /// - [`AmmError::Underflow`] if a balance is below its reserve.
    pub fn skim<L: TokenLedger + Clone>(
        &self,
        ledger: &mut L,
        to: Address,
    ) -> Result<(), AmmError> {
        let _entered = self.guard.enter()?;
        let reserves = self.get_reserves();
        let (balance0, balance1) = self.balances(ledger);
        let excess0 = balance0.safe_sub(reserves.reserve0, "excess0")?;
        let excess1 = balance1.safe_sub(reserves.reserve1, "excess1")?;

        let mut staged = ledger.clone();
        if !excess0.is_zero() {
            staged.transfer(self.token0(), self.address, to, excess0)?;
        }
        if !excess1.is_zero() {
            staged.transfer(self.token1(), self.address, to, excess1)?;
        }
        *ledger = staged;
        debug!(pair = %self.address, %to, %excess0, %excess1, "skim");
        Ok(())
    }

    /// Resets the reserves to the pair's actual balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on re-entry.
    /// - [`AmmError::Overflow`] if a balance exceeds 112 bits.
    pub fn sync<L: TokenLedger + ?Sized>(
        &self,
        ctx: &mut CallContext,
        ledger: &L,
    ) -> Result<(), AmmError> {
        let _entered = self.guard.enter()?;
        let (balance0, balance1) = self.balances(ledger);
        let mut state = self.state.lock();
        state.update(balance0, balance1, ctx.timestamp_u32())?;
        let sync = self.sync_event(&state);
        drop(state);
        ctx.emit(sync);
        Ok(())
    }
}

/// Input implied by a balance: whatever exceeds `reserve - amount_out`.
fn amount_in(balance: U256, reserve: U256, amount_out: U256) -> U256 {
    balance.saturating_sub(reserve - amount_out)
}
