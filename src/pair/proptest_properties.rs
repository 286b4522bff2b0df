//! Property-based tests for the pair engine.
//!
//! 1. **Invariant growth**: a swap priced by `get_amount_out` never shrinks
//!    `reserve0 * reserve1`.
//! 2. **Tight quotes**: asking for one unit more than `get_amount_out`
//!    fails the invariant check.
//! 3. **No free liquidity**: minting and immediately burning returns no
//!    more than was deposited.
//! 4. **Accumulator wrap**: time-weighted averages survive wrapping of the
//!    cumulative price.

#![allow(clippy::panic)]

use alloy_primitives::{Address, U256, address};
use proptest::prelude::*;

use super::oracle::{accumulate, average_price};
use super::Pair;
use crate::domain::{CallContext, TokenPair};
use crate::error::AmmError;
use crate::ledger::InMemoryLedger;
use crate::math::encode_price;
use crate::router::get_amount_out;
use crate::traits::TokenLedger;

const TOKEN_A: Address = address!("0x1000000000000000000000000000000000000000");
const TOKEN_B: Address = address!("0x2000000000000000000000000000000000000000");
const PAIR: Address = address!("0x00000000000000000000000000000000000000aa");
const ALICE: Address = address!("0x00000000000000000000000000000000000a11ce");
const BOB: Address = address!("0x0000000000000000000000000000000000000b0b");

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fund(ledger: &mut InMemoryLedger, token: Address, owner: Address, amount: U256) {
    let Ok(()) = ledger.mint(token, owner, amount) else {
        panic!("fund");
    };
}

fn seeded(r0: u128, r1: u128) -> (Pair, InMemoryLedger, CallContext) {
    let Ok(tokens) = TokenPair::new(TOKEN_A, TOKEN_B) else {
        panic!("distinct tokens");
    };
    let pair = Pair::new(PAIR, Address::ZERO, tokens);
    let mut ledger = InMemoryLedger::default();
    let mut ctx = CallContext::new(ALICE, 1);
    fund(&mut ledger, TOKEN_A, PAIR, U256::from(r0));
    fund(&mut ledger, TOKEN_B, PAIR, U256::from(r1));
    let Ok(_) = pair.mint(&mut ctx, &ledger, ALICE) else {
        panic!("seed mint");
    };
    (pair, ledger, ctx)
}

fn reserve() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..1_000_000_000_000_000_000_000_000u128
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn quoted_swap_keeps_invariant(
        r0 in reserve(),
        r1 in reserve(),
        amount_in in 1_000u128..10_000_000_000_000_000_000_000u128,
    ) {
        let (pair, mut ledger, mut ctx) = seeded(r0, r1);
        let before = pair.get_reserves();
        let Ok(out) = get_amount_out(U256::from(amount_in), before.reserve0, before.reserve1)
        else {
            panic!("quote");
        };
        prop_assume!(!out.is_zero());
        prop_assume!(out + U256::from(1u8) < before.reserve1);

        fund(&mut ledger, TOKEN_A, PAIR, U256::from(amount_in));
        let greedy = pair.swap(&mut ctx, &mut ledger, U256::ZERO, out + U256::from(1u8), BOB, None);
        prop_assert_eq!(greedy, Err(AmmError::K));
        prop_assert_eq!(pair.get_reserves(), before);

        let fair = pair.swap(&mut ctx, &mut ledger, U256::ZERO, out, BOB, None);
        prop_assert_eq!(fair, Ok(()));
        let after = pair.get_reserves();
        prop_assert!(after.reserve0 * after.reserve1 >= before.reserve0 * before.reserve1);
        prop_assert_eq!(ledger.balance_of(TOKEN_B, BOB), out);
    }

    #[test]
    fn mint_then_burn_returns_at_most_deposit(
        r0 in reserve(),
        r1 in reserve(),
        d0 in 1_000u128..1_000_000_000_000_000_000_000u128,
        d1 in 1_000u128..1_000_000_000_000_000_000_000u128,
    ) {
        let (pair, mut ledger, mut ctx) = seeded(r0, r1);
        fund(&mut ledger, TOKEN_A, PAIR, U256::from(d0));
        fund(&mut ledger, TOKEN_B, PAIR, U256::from(d1));

        ctx.set_caller(BOB);
        let minted = match pair.mint(&mut ctx, &ledger, BOB) {
            Ok(minted) => minted,
            Err(AmmError::InsufficientLiquidityMinted) => return Ok(()),
            Err(err) => panic!("mint: {err}"),
        };
        let Ok(()) = pair.transfer(&mut ctx, PAIR, minted) else {
            panic!("return shares");
        };
        let (amount0, amount1) = match pair.burn(&mut ctx, &mut ledger, BOB) {
            Ok(amounts) => amounts,
            Err(AmmError::InsufficientLiquidityBurned) => return Ok(()),
            Err(err) => panic!("burn: {err}"),
        };
        prop_assert!(amount0 <= U256::from(d0));
        prop_assert!(amount1 <= U256::from(d1));
    }

    #[test]
    fn average_price_survives_wraparound(
        headroom in any::<u64>(),
        reserve_in in 1u128..(1u128 << 112),
        reserve_out in 1u128..(1u128 << 112),
        elapsed in 1u32..,
    ) {
        let start = U256::MAX - U256::from(headroom);
        let (reserve_in, reserve_out) = (U256::from(reserve_in), U256::from(reserve_out));
        let end = accumulate(start, reserve_in, reserve_out, elapsed);
        prop_assert_eq!(
            average_price(start, end, elapsed),
            encode_price(reserve_in, reserve_out)
        );
    }
}
