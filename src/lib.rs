//! # pairswap
//!
//! Constant-product automated market maker: two-token liquidity pairs, a
//! permissioned pair registry, and a router for multi-hop trading.
//!
//! The crate is a library.  Token balances live behind the
//! [`TokenLedger`](traits::TokenLedger) capability, so the same engine runs
//! against the bundled [`InMemoryLedger`](ledger::InMemoryLedger) in tests
//! and simulations or against any other ledger a host provides.
//!
//! - **Pairs** hold two reserves, issue fungible liquidity shares, price
//!   trades with the `x · y = k` invariant and a 0.3% fee, support
//!   optimistic flash swaps, and keep cumulative-price accumulators for
//!   time-weighted oracles.
//! - **The registry** creates at most one pair per unordered token pair at
//!   a deterministic address, stores the protocol-fee recipient, and gates
//!   administration behind roles and a pause switch.
//! - **The router** quotes routes, enforces slippage limits and deadlines,
//!   and wraps native currency, running every operation all-or-nothing.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pairswap = "0.1"
//! ```
//!
//! ## Create a pair, add liquidity, and swap
//!
//! ```rust
//! use alloy_primitives::{U256, address};
//! use pairswap::config::{RegistryConfig, RouterConfig};
//! use pairswap::domain::{AddLiquidity, CallContext, Role, Route};
//! use pairswap::factory::PairRegistry;
//! use pairswap::ledger::InMemoryLedger;
//! use pairswap::router::Router;
//! use pairswap::traits::TokenLedger;
//!
//! let admin = address!("0x000000000000000000000000000000000000ad01");
//! let trader = address!("0x0000000000000000000000000000000000000b0b");
//! let usdc = address!("0x1000000000000000000000000000000000000000");
//! let weth = address!("0x2000000000000000000000000000000000000000");
//! let one = U256::from(1_000_000_000_000_000_000u64);
//!
//! // 1. Registry and router
//! let mut registry = PairRegistry::new(
//!     &RegistryConfig::new(address!("0x00000000000000000000000000000000000000ff"), admin)
//!         .expect("valid registry config"),
//! )
//! .expect("registry");
//! let router = Router::new(
//!     &RouterConfig::new(address!("0x0000000000000000000000000000000000000777"), weth)
//!         .expect("valid router config"),
//! )
//! .expect("router");
//!
//! // 2. Let the router create pairs on demand
//! let mut ctx = CallContext::new(admin, 1_000);
//! registry
//!     .grant_role(&mut ctx, Role::PairCreator, router.address())
//!     .expect("admin may grant");
//!
//! // 3. Fund accounts
//! let mut ledger = InMemoryLedger::new(weth);
//! for token in [usdc, weth] {
//!     ledger.mint(token, admin, one * U256::from(100u8)).expect("mint");
//!     ledger.approve(token, admin, router.address(), U256::MAX);
//! }
//!
//! // 4. Provide liquidity (creates the pair)
//! let (_, _, shares) = router
//!     .add_liquidity(&mut ctx, &mut registry, &mut ledger, &AddLiquidity {
//!         token_a: usdc,
//!         token_b: weth,
//!         amount_a_desired: one * U256::from(10u8),
//!         amount_b_desired: one * U256::from(10u8),
//!         amount_a_min: U256::ZERO,
//!         amount_b_min: U256::ZERO,
//!         to: admin,
//!         deadline: 2_000,
//!     })
//!     .expect("liquidity added");
//! assert!(shares > U256::ZERO);
//!
//! // 5. Swap one unit for the trader
//! let route = Route::new(vec![usdc, weth], trader, 2_000).expect("route");
//! let amounts = router
//!     .swap_exact_tokens_for_tokens(&mut ctx, &registry, &mut ledger, one, U256::ZERO, &route)
//!     .expect("swapped");
//! assert_eq!(ledger.balance_of(weth, trader), amounts[1]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  quotes, slippage, deadlines, native wrapping
//! └──────┬──────┘
//!        │ pair_for / create_pair
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one pair per token pair, roles, pause, fee recipient
//! └──────┬──────┘
//!        │ Arc<Pair>
//!        ▼
//! ┌─────────────┐
//! │    Pair      │  reserves, shares, swap / mint / burn, price oracle
//! └──────┬──────┘
//!        │ TokenLedger
//!        ▼
//! ┌─────────────┐
//! │   Ledger     │  token and native balances
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`TokenPair`](domain::TokenPair), [`Reserves`](domain::Reserves), [`Route`](domain::Route), [`Event`](domain::Event), [`CallContext`](domain::CallContext) |
//! | [`traits`] | Capabilities: [`TokenLedger`](traits::TokenLedger), [`WrappedNative`](traits::WrappedNative), [`SwapCallee`](traits::SwapCallee), [`FeeConfig`](traits::FeeConfig) |
//! | [`config`] | Validated blueprints: [`RegistryConfig`](config::RegistryConfig), [`RouterConfig`](config::RouterConfig) |
//! | [`pair`]   | The [`Pair`](pair::Pair) engine, its price oracle, and [`Transaction`](pair::Transaction) |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) with access control, pause, and the shared [`FeeRecipient`](factory::FeeRecipient) |
//! | [`router`] | [`Router`](router::Router) and the pricing [`library`](router::library) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`math`]   | Checked arithmetic, integer square root, UQ112x112 |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod router;
pub mod traits;

pub use alloy_primitives::{Address, B256, U256};
