//! UQ112x112 fixed-point helpers for the price accumulators.
//!
//! A UQ112x112 number is an unsigned value with 112 integer bits and 112
//! fractional bits, stored in the low 224 bits of a [`U256`].  Prices are
//! `reserve_other / reserve_self` encoded this way, then multiplied by
//! elapsed seconds and summed into the pair's cumulative price fields.

use alloy_primitives::U256;

/// `2^112`, the UQ112x112 scaling factor.
pub const Q112: U256 = U256::from_limbs([0, 1 << 48, 0, 0]);

/// Largest value a pair reserve may hold: `2^112 - 1`.
pub const MAX_RESERVE: U256 = U256::from_limbs([u64::MAX, (1 << 48) - 1, 0, 0]);

/// Encodes a 112-bit integer as UQ112x112.
///
/// `y` must not exceed [`MAX_RESERVE`]; reserves are bounded before they
/// are stored, so the product never leaves 224 bits.
#[must_use]
pub fn encode(y: U256) -> U256 {
    y * Q112
}

/// Divides a UQ112x112 value by a 112-bit integer, yielding UQ112x112.
///
/// Returns `None` when `y` is zero.
#[must_use]
pub fn uqdiv(x: U256, y: U256) -> Option<U256> {
    x.checked_div(y)
}

/// Spot price of `reserve_out` per unit of `reserve_in` in UQ112x112.
///
/// Returns `None` when `reserve_in` is zero.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use pairswap::math::{Q112, encode_price};
///
/// let r = U256::from(3_000_000_000_000_000_000u128);
/// assert_eq!(encode_price(r, r), Some(Q112));
/// ```
#[must_use]
pub fn encode_price(reserve_in: U256, reserve_out: U256) -> Option<U256> {
    uqdiv(encode(reserve_out), reserve_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q112_is_two_pow_112() {
        assert_eq!(Q112, U256::from(1u8) << 112);
        assert_eq!(MAX_RESERVE, Q112 - U256::from(1u8));
    }

    #[test]
    fn encode_then_divide() {
        // 6 : 2 pool -> token0 priced at 1/3 token1, token1 at 3 token0
        let r0 = U256::from(6u8);
        let r1 = U256::from(2u8);
        assert_eq!(encode_price(r0, r1), Some(Q112 / U256::from(3u8)));
        assert_eq!(encode_price(r1, r0), Some(Q112 * U256::from(3u8)));
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(encode_price(U256::ZERO, U256::from(1u8)), None);
    }

    #[test]
    fn max_reserve_stays_within_224_bits() {
        let encoded = encode(MAX_RESERVE);
        assert!(encoded < (U256::from(1u8) << 224));
    }
}
