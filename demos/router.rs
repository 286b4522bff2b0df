//! Router example.
//!
//! Demonstrates providing liquidity through the router (which creates the
//! pairs on demand), quoting and executing a multi-hop swap with slippage
//! and deadline guards, trading native currency, and withdrawing.
//!
//! # Run
//!
//! ```bash
//! cargo run --example router
//! ```

use alloy_primitives::{Address, U256, address};
use pairswap::config::{RegistryConfig, RouterConfig};
use pairswap::domain::{AddLiquidity, CallContext, RemoveLiquidity, Role, Route};
use pairswap::factory::PairRegistry;
use pairswap::ledger::InMemoryLedger;
use pairswap::router::{Router, get_amounts_out};
use pairswap::traits::{TokenLedger, WrappedNative};

const REGISTRY: Address = address!("0x00000000000000000000000000000000000000ff");
const ROUTER: Address = address!("0x0000000000000000000000000000000000000777");
const ADMIN: Address = address!("0x000000000000000000000000000000000000ad01");
const TRADER: Address = address!("0x0000000000000000000000000000000000000b0b");
const WETH: Address = address!("0x000000000000000000000000000000000000eeee");
const USDC: Address = address!("0x1000000000000000000000000000000000000000");
const DAI: Address = address!("0x2000000000000000000000000000000000000000");
const WBTC: Address = address!("0x3000000000000000000000000000000000000000");

const DEADLINE: u64 = 1_700_003_600;

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000_000_000_000u64)
}

fn provide(
    router: &Router,
    ctx: &mut CallContext,
    registry: &mut PairRegistry,
    ledger: &mut InMemoryLedger,
    token_a: Address,
    token_b: Address,
    amount: U256,
) -> Result<U256, Box<dyn std::error::Error>> {
    let params = AddLiquidity {
        token_a,
        token_b,
        amount_a_desired: amount,
        amount_b_desired: amount,
        amount_a_min: U256::ZERO,
        amount_b_min: U256::ZERO,
        to: ctx.caller(),
        deadline: DEADLINE,
    };
    let (_, _, shares) = router.add_liquidity(ctx, registry, ledger, &params)?;
    Ok(shares)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Router ===\n");

    // ── 1. Registry, router, and balances ───────────────────────────────
    let mut registry = PairRegistry::new(&RegistryConfig::new(REGISTRY, ADMIN)?)?;
    let router = Router::new(&RouterConfig::new(ROUTER, WETH)?)?;
    let mut ctx = CallContext::new(ADMIN, 1_700_000_000);
    registry.grant_role(&mut ctx, Role::PairCreator, router.address())?;

    let mut ledger = InMemoryLedger::new(WETH);
    for token in [USDC, DAI, WBTC] {
        ledger.mint(token, ADMIN, ether(10_000))?;
        ledger.approve(token, ADMIN, ROUTER, U256::MAX);
    }
    ledger.fund_native(ADMIN, ether(100))?;
    ledger.mint(USDC, TRADER, ether(100))?;
    ledger.approve(USDC, TRADER, ROUTER, U256::MAX);
    ledger.fund_native(TRADER, ether(10))?;

    // ── 2. Provide liquidity; the router creates the pairs ──────────────
    let usdc_dai = provide(
        &router,
        &mut ctx,
        &mut registry,
        &mut ledger,
        USDC,
        DAI,
        ether(1_000),
    )?;
    provide(
        &router,
        &mut ctx,
        &mut registry,
        &mut ledger,
        DAI,
        WBTC,
        ether(1_000),
    )?;
    router.add_liquidity_native(&mut ctx, &mut registry, &mut ledger, &AddLiquidity {
        token_a: USDC,
        token_b: WETH,
        amount_a_desired: ether(1_000),
        amount_b_desired: ether(50),
        amount_a_min: U256::ZERO,
        amount_b_min: U256::ZERO,
        to: ADMIN,
        deadline: DEADLINE,
    })?;
    println!("Pairs created: {}", registry.all_pairs_length());
    println!("  USDC/DAI shares: {usdc_dai}");

    // ── 3. Quote and execute USDC → DAI → WBTC ──────────────────────────
    ctx.set_caller(TRADER);
    let route = Route::new(vec![USDC, DAI, WBTC], TRADER, DEADLINE)?;
    let quoted = get_amounts_out(&registry, ether(10), route.path())?;
    let min_out = quoted[2] * U256::from(99u8) / U256::from(100u8);
    let amounts = router.swap_exact_tokens_for_tokens(
        &mut ctx,
        &registry,
        &mut ledger,
        ether(10),
        min_out,
        &route,
    )?;
    println!("\n--- Swap: 10 USDC → DAI → WBTC ---");
    println!("  Hops:        {amounts:?}");
    println!("  WBTC:        {}", ledger.balance_of(WBTC, TRADER));

    // ── 4. Native currency in ───────────────────────────────────────────
    let route = Route::new(vec![WETH, USDC], TRADER, DEADLINE)?;
    let amounts = router.swap_exact_native_for_tokens(
        &mut ctx,
        &registry,
        &mut ledger,
        ether(1),
        U256::ZERO,
        &route,
    )?;
    println!("\n--- Swap: 1 native → USDC ---");
    println!("  USDC out:    {}", amounts[1]);
    println!("  Native left: {}", ledger.native_balance(TRADER));

    // ── 5. A deadline in the past is refused ────────────────────────────
    let stale = Route::new(vec![USDC, DAI], TRADER, 1_600_000_000)?;
    let refused = router.swap_exact_tokens_for_tokens(
        &mut ctx,
        &registry,
        &mut ledger,
        ether(1),
        U256::ZERO,
        &stale,
    );
    println!("\nStale route: {refused:?}");

    // ── 6. Withdraw the USDC/DAI position ───────────────────────────────
    ctx.set_caller(ADMIN);
    let pair = registry.get_pair(USDC, DAI).ok_or("USDC/DAI pair missing")?;
    pair.approve(&mut ctx, ROUTER, usdc_dai);
    let (usdc, dai) = router.remove_liquidity(&mut ctx, &registry, &mut ledger, &RemoveLiquidity {
        token_a: USDC,
        token_b: DAI,
        liquidity: usdc_dai,
        amount_a_min: U256::ZERO,
        amount_b_min: U256::ZERO,
        to: ADMIN,
        deadline: DEADLINE,
    })?;
    println!("\n--- Remove liquidity ---");
    println!("  Returned:    {usdc} USDC + {dai} DAI");

    println!("\n=== Done ===");
    Ok(())
}
