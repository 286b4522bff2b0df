//! Time-weighted price accumulators.
//!
//! Each pair keeps two running sums, `price0_cumulative_last` and
//! `price1_cumulative_last`, of its UQ112x112 spot price multiplied by the
//! seconds it was in effect.  Sampling a sum at two times and dividing the
//! difference by the elapsed seconds yields the time-weighted average price
//! over that window.  The sums are meant to overflow: only differences are
//! meaningful, and wrapping subtraction recovers them.

use alloy_primitives::U256;

use super::Pair;
use crate::math::encode_price;

/// A pair's accumulators as they would read at a given timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CumulativePrices {
    /// Accumulated price of `token0` in `token1`.
    pub price0_cumulative: U256,
    /// Accumulated price of `token1` in `token0`.
    pub price1_cumulative: U256,
    /// The 32-bit timestamp the values correspond to.
    pub timestamp: u32,
}

/// Adds `reserve_out / reserve_in` (UQ112x112) times `elapsed` to
/// `cumulative`, wrapping on overflow.  Leaves `cumulative` untouched when
/// `reserve_in` is zero.
pub(crate) fn accumulate(
    cumulative: U256,
    reserve_in: U256,
    reserve_out: U256,
    elapsed: u32,
) -> U256 {
    match encode_price(reserve_in, reserve_out) {
        Some(price) => cumulative.wrapping_add(price.wrapping_mul(U256::from(elapsed))),
        None => cumulative,
    }
}

/// Reads `pair`'s accumulators as if it were updated at `now`, without
/// touching the pair.
///
/// Saves an observer from calling [`Pair::sync`] just to bring the sums up
/// to date.
#[must_use]
pub fn current_cumulative_prices(pair: &Pair, now: u32) -> CumulativePrices {
    let reserves = pair.get_reserves();
    let mut price0_cumulative = pair.price0_cumulative_last();
    let mut price1_cumulative = pair.price1_cumulative_last();
    let elapsed = now.wrapping_sub(reserves.block_timestamp_last);
    if elapsed > 0 && !reserves.is_empty() {
        price0_cumulative =
            accumulate(price0_cumulative, reserves.reserve0, reserves.reserve1, elapsed);
        price1_cumulative =
            accumulate(price1_cumulative, reserves.reserve1, reserves.reserve0, elapsed);
    }
    CumulativePrices {
        price0_cumulative,
        price1_cumulative,
        timestamp: now,
    }
}

/// Time-weighted average price (UQ112x112) between two samples of the same
/// accumulator taken `elapsed` seconds apart.
///
/// Returns `None` when `elapsed` is zero.
#[must_use]
pub fn average_price(start: U256, end: U256, elapsed: u32) -> Option<U256> {
    end.wrapping_sub(start).checked_div(U256::from(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Q112;

    #[test]
    fn accumulate_multiplies_price_by_elapsed() {
        let out = accumulate(U256::ZERO, U256::from(4u8), U256::from(8u8), 10);
        assert_eq!(out, Q112 * U256::from(20u8));
    }

    #[test]
    fn accumulate_ignores_empty_reserve() {
        let start = U256::from(7u8);
        assert_eq!(accumulate(start, U256::ZERO, U256::from(8u8), 10), start);
    }

    #[test]
    fn accumulate_wraps() {
        let out = accumulate(U256::MAX, U256::from(1u8), U256::from(1u8), 1);
        assert_eq!(out, Q112 - U256::from(1u8));
    }

    #[test]
    fn average_price_survives_wraparound() {
        let start = U256::MAX - Q112 + U256::from(1u8);
        let end = Q112;
        assert_eq!(average_price(start, end, 2), Some(Q112));
    }

    #[test]
    fn average_price_rejects_zero_window() {
        assert_eq!(average_price(U256::ZERO, Q112, 0), None);
    }
}
