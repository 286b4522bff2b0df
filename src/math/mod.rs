//! Arithmetic utilities for pair and router calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe 256-bit
//! operations, [`isqrt`] for share issuance and protocol-fee growth, and
//! the UQ112x112 fixed-point helpers behind the price accumulators.
//!
//! | Item | Use |
//! |------|-----|
//! | [`CheckedArithmetic`] | reserves, balances, shares |
//! | [`isqrt`] | `sqrt(amount0 * amount1)`, `sqrt(k)` |
//! | [`encode_price`], [`Q112`] | cumulative price accumulators |
//! | [`MAX_RESERVE`] | 112-bit reserve bound |

mod checked;
mod sqrt;
mod uq112x112;

pub use checked::CheckedArithmetic;
pub use sqrt::isqrt;
pub use uq112x112::{MAX_RESERVE, Q112, encode, encode_price, uqdiv};
