//! Integer square root.

use alloy_primitives::U256;

/// Floor of the square root of `y`, via the Babylonian method.
///
/// Used for the initial share issue (`sqrt(amount0 * amount1)`) and for
/// the protocol-fee growth check (`sqrt(k)`).
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use pairswap::math::isqrt;
///
/// assert_eq!(isqrt(U256::from(16u8)), U256::from(4u8));
/// assert_eq!(isqrt(U256::from(17u8)), U256::from(4u8));
/// assert_eq!(isqrt(U256::ZERO), U256::ZERO);
/// ```
#[must_use]
pub fn isqrt(y: U256) -> U256 {
    if y > U256::from(3u8) {
        let mut z = y;
        // y / 2 + 1 cannot overflow for y > 3
        let mut x = (y >> 1) + U256::from(1u8);
        while x < z {
            z = x;
            x = (y / x + x) >> 1;
        }
        z
    } else if y.is_zero() {
        U256::ZERO
    } else {
        U256::from(1u8)
    }
}
