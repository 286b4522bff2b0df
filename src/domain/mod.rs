//! Fundamental domain value types used throughout the AMM library.
//!
//! This module contains the value types that model the exchange domain:
//! canonical token pairs, reserve snapshots, registry roles, events, the
//! per-call execution context, and router request descriptors.
//! Types with invariants use validated constructors to enforce them.

mod call_context;
mod event;
mod liquidity_spec;
mod reserves;
mod role;
mod route;
mod token_pair;

pub use call_context::CallContext;
pub use event::Event;
pub use liquidity_spec::{AddLiquidity, RemoveLiquidity};
pub use reserves::Reserves;
pub use role::Role;
pub use route::Route;
pub use token_pair::TokenPair;
