//! The reserve pair engine.
//!
//! A [`Pair`] holds the reserves of two tokens, issues shares against
//! them, prices swaps by the constant-product rule with a 0.3% fee, and
//! accumulates time-weighted prices for on-chain observers.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Pair`] | mint, burn, swap, skim, sync, and the share token |
//! | [`FlashSwap`] | callee and payload for an optimistic swap |
//! | [`Transaction`] | staged ledger and pair checkpoints of one operation |
//! | [`oracle`] | cumulative-price sampling and averaging |
//! | [`MINIMUM_LIQUIDITY`] | shares locked forever by the first mint |

mod engine;
mod lock;
pub mod oracle;
mod state;
mod transaction;

#[cfg(test)]
mod proptest_properties;

pub use engine::{FlashSwap, MINIMUM_LIQUIDITY, Pair};
pub use oracle::{CumulativePrices, average_price, current_cumulative_prices};
pub use transaction::Transaction;

pub(crate) use state::PairState;
