//! Multi-hop swap route.

use alloy_primitives::Address;

use crate::error::AmmError;

/// A swap path together with its recipient and deadline.
///
/// `path[0]` is the token paid in, `path[n-1]` the token received; every
/// consecutive pair of tokens must have a registered pair.
///
/// # Invariants
///
/// The path holds at least two tokens.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use pairswap::domain::Route;
///
/// let a = address!("0x1000000000000000000000000000000000000000");
/// let b = address!("0x2000000000000000000000000000000000000000");
/// let me = address!("0x00000000000000000000000000000000000a11ce");
///
/// let route = Route::new(vec![a, b], me, 1_700_000_000).expect("two hops");
/// assert_eq!(route.hops(), 1);
/// assert!(Route::new(vec![a], me, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    path: Vec<Address>,
    to: Address,
    deadline: u64,
}

impl Route {
    /// Creates a route.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `path` holds fewer than two
    /// tokens.
    pub fn new(path: Vec<Address>, to: Address, deadline: u64) -> Result<Self, AmmError> {
        if path.len() < 2 {
            return Err(AmmError::InvalidPath);
        }
        Ok(Self { path, to, deadline })
    }

    /// Returns the token path.
    #[must_use]
    pub fn path(&self) -> &[Address] {
        &self.path
    }

    /// Returns the recipient of the final output.
    #[must_use]
    pub const fn to(&self) -> Address {
        self.to
    }

    /// Returns the deadline (inclusive).
    #[must_use]
    pub const fn deadline(&self) -> u64 {
        self.deadline
    }

    /// Returns the number of pairs traversed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len() - 1
    }

    /// Returns the first token of the path.
    #[must_use]
    pub fn token_in(&self) -> Address {
        self.path[0]
    }

    /// Returns the last token of the path.
    #[must_use]
    pub fn token_out(&self) -> Address {
        self.path[self.path.len() - 1]
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const A: Address = address!("0x1000000000000000000000000000000000000000");
    const B: Address = address!("0x2000000000000000000000000000000000000000");
    const C: Address = address!("0x3000000000000000000000000000000000000000");

    #[test]
    fn rejects_short_paths() {
        assert_eq!(Route::new(vec![], A, 0), Err(AmmError::InvalidPath));
        assert_eq!(Route::new(vec![A], A, 0), Err(AmmError::InvalidPath));
    }

    #[test]
    fn endpoints() {
        let Ok(route) = Route::new(vec![A, B, C], A, 9) else {
            panic!("valid route");
        };
        assert_eq!(route.hops(), 2);
        assert_eq!(route.token_in(), A);
        assert_eq!(route.token_out(), C);
        assert_eq!(route.deadline(), 9);
    }
}
