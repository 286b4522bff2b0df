//! Canonically ordered pair of distinct token addresses.

use alloy_primitives::Address;

use crate::error::AmmError;

/// An ordered pair of distinct, non-zero token addresses.
///
/// The canonical ordering guarantees that `token0 < token1`, so `(A, B)`
/// and `(B, A)` describe the same pair.  The registry keys pairs and
/// derives pair addresses from this ordering.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use pairswap::domain::TokenPair;
///
/// let a = address!("0x1000000000000000000000000000000000000000");
/// let b = address!("0x2000000000000000000000000000000000000000");
///
/// // Order is enforced automatically:
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAddresses`] if both addresses are equal.
    /// - [`AmmError::ZeroAddress`] if the lower address is zero (and
    ///   therefore either one is).
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, AmmError> {
        if token_a == token_b {
            return Err(AmmError::IdenticalAddresses);
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        if token0 == Address::ZERO {
            return Err(AmmError::ZeroAddress);
        }

        Ok(Self { token0, token1 })
    }

    /// Returns the lower address.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher address.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is part of this pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }

    /// Returns `true` if `token` is `token0`.
    #[must_use]
    pub fn is_token0(&self, token: Address) -> bool {
        self.token0 == token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `token` is not in the pair.
    pub fn other(&self, token: Address) -> Result<Address, AmmError> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::InvalidPath)
        }
    }

    /// Packs both addresses back to back (`token0 ++ token1`, 40 bytes).
    ///
    /// This is the preimage of the CREATE2 salt used by the registry.
    #[must_use]
    pub fn packed(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[..20].copy_from_slice(self.token0.as_slice());
        out[20..].copy_from_slice(self.token1.as_slice());
        out
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
    fn valid_pair_preserves_order() {
        let Ok(pair) = TokenPair::new(A, B) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.token0(), A);
        assert_eq!(pair.token1(), B);
    }

    #[test]
    fn auto_sorts_reversed_input() {
        let Ok(pair) = TokenPair::new(B, A) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.token0(), A);
        assert_eq!(pair.token1(), B);
    }

    #[test]
    fn rejects_same_address() {
        assert_eq!(TokenPair::new(A, A), Err(AmmError::IdenticalAddresses));
    }

    #[test]
    fn rejects_zero_address_either_side() {
        assert_eq!(TokenPair::new(Address::ZERO, A), Err(AmmError::ZeroAddress));
        assert_eq!(TokenPair::new(A, Address::ZERO), Err(AmmError::ZeroAddress));
    }

    #[test]
    fn contains_and_other() {
        let Ok(pair) = TokenPair::new(A, B) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(A));
        assert!(pair.contains(B));
        assert!(!pair.contains(C));
        assert_eq!(pair.other(A), Ok(B));
        assert_eq!(pair.other(B), Ok(A));
        assert_eq!(pair.other(C), Err(AmmError::InvalidPath));
    }

    #[test]
    fn both_orders_are_equal() {
        let (Ok(p1), Ok(p2)) = (TokenPair::new(A, B), TokenPair::new(B, A)) else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn packed_layout() {
        let Ok(pair) = TokenPair::new(B, A) else {
            panic!("expected Ok");
        };
        let packed = pair.packed();
        assert_eq!(&packed[..20], A.as_slice());
        assert_eq!(&packed[20..], B.as_slice());
    }
}
