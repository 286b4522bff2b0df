//! Pair engine example.
//!
//! Demonstrates creating a pair through the registry, providing liquidity,
//! swapping against the `x · y = k` invariant, reading the price
//! accumulators, and collecting the protocol fee on withdrawal.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pair
//! ```

use alloy_primitives::{Address, U256, address};
use pairswap::config::RegistryConfig;
use pairswap::domain::CallContext;
use pairswap::factory::PairRegistry;
use pairswap::ledger::InMemoryLedger;
use pairswap::pair::{average_price, current_cumulative_prices};
use pairswap::router::get_amount_out;
use pairswap::traits::TokenLedger;

const REGISTRY: Address = address!("0x00000000000000000000000000000000000000ff");
const ADMIN: Address = address!("0x000000000000000000000000000000000000ad01");
const LP: Address = address!("0x00000000000000000000000000000000000a11ce");
const TRADER: Address = address!("0x0000000000000000000000000000000000000b0b");
const TREASURY: Address = address!("0x000000000000000000000000000000000000fee0");
const USDC: Address = address!("0x1000000000000000000000000000000000000000");
const WETH: Address = address!("0x2000000000000000000000000000000000000000");

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000_000_000_000u64)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Reserve pair (x · y = k) ===\n");

    // ── 1. Registry and pair ────────────────────────────────────────────
    let config = RegistryConfig::new(REGISTRY, ADMIN)?;
    let mut registry = PairRegistry::new(&config)?;
    let mut ctx = CallContext::new(ADMIN, 1_700_000_000);
    let pair_address = registry.create_pair(&mut ctx, USDC, WETH)?;
    registry.set_fee_to(&mut ctx, Some(TREASURY))?;
    let pair = registry
        .get_pair(USDC, WETH)
        .ok_or("pair missing after creation")?;

    println!("Pair created at {pair_address}");
    println!("  token0:      {}", pair.token0());
    println!("  token1:      {}", pair.token1());
    println!("  fee to:      {:?}", pair.fee_to());

    // ── 2. Provide liquidity: 1 000 USDC + 1 000 WETH ───────────────────
    let mut ledger = InMemoryLedger::default();
    ledger.mint(USDC, LP, ether(1_000))?;
    ledger.mint(WETH, LP, ether(1_000))?;
    ledger.transfer(USDC, LP, pair_address, ether(1_000))?;
    ledger.transfer(WETH, LP, pair_address, ether(1_000))?;

    ctx.set_caller(LP);
    let shares = pair.mint(&mut ctx, &ledger, LP)?;
    println!("\n--- Mint ---");
    println!("  Shares:      {shares}");
    println!("  Supply:      {}", pair.total_supply());

    // ── 3. Swap 1 USDC for WETH ─────────────────────────────────────────
    ctx.advance(60);
    let reserves = pair.get_reserves();
    let amount_in = ether(1);
    let amount_out = get_amount_out(amount_in, reserves.reserve0, reserves.reserve1)?;
    ledger.mint(USDC, TRADER, amount_in)?;
    ledger.transfer(USDC, TRADER, pair_address, amount_in)?;

    ctx.set_caller(TRADER);
    pair.swap(&mut ctx, &mut ledger, U256::ZERO, amount_out, TRADER, None)?;
    println!("\n--- Swap: sell 1 USDC ---");
    println!("  Amount out:  {amount_out}");
    println!("  Reserves:    {:?}", pair.get_reserves());

    // ── 4. Time-weighted price over the next minute ─────────────────────
    let start = current_cumulative_prices(&pair, ctx.timestamp_u32());
    ctx.advance(60);
    let end = current_cumulative_prices(&pair, ctx.timestamp_u32());
    let twap = average_price(start.price0_cumulative, end.price0_cumulative, 60)
        .ok_or("no time elapsed")?;
    println!("\n--- Oracle ---");
    println!("  TWAP (UQ112x112, WETH per USDC): {twap}");

    // ── 5. Withdraw everything; the treasury receives its fee shares ────
    ctx.set_caller(LP);
    pair.transfer(&mut ctx, pair_address, shares)?;
    let (amount0, amount1) = pair.burn(&mut ctx, &mut ledger, LP)?;
    println!("\n--- Burn ---");
    println!("  Returned:    {amount0} token0 + {amount1} token1");
    println!("  Fee shares:  {}", pair.balance_of(TREASURY));
    println!("  LP USDC:     {}", ledger.balance_of(USDC, LP));

    println!("\n=== Done ===");
    Ok(())
}
