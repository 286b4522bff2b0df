//! Reserve snapshot returned by a pair.

use alloy_primitives::{Address, U256};

use crate::error::AmmError;

/// The pair's cached reserves and the 32-bit timestamp of their last
/// update, as returned by [`Pair::get_reserves`](crate::pair::Pair::get_reserves).
///
/// Both reserves are bounded by [`MAX_RESERVE`](crate::math::MAX_RESERVE)
/// (`2^112 - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    /// Reserve of `token0`.
    pub reserve0: U256,
    /// Reserve of `token1`.
    pub reserve1: U256,
    /// Block timestamp (mod 2^32) of the last reserve update.
    pub block_timestamp_last: u32,
}

impl Reserves {
    /// Returns `true` while either reserve is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }

    /// Orients the reserves so that `token` comes first.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `token` is neither `token0` nor
    /// `token1`.
    pub fn oriented(
        &self,
        token0: Address,
        token1: Address,
        token: Address,
    ) -> Result<(U256, U256), AmmError> {
        if token == token0 {
            Ok((self.reserve0, self.reserve1))
        } else if token == token1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(AmmError::InvalidPath)
        }
    }
}
