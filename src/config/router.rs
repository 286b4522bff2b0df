//! Configuration for the router.

use alloy_primitives::Address;

use crate::error::AmmError;

/// Configuration for a [`Router`](crate::router::Router).
///
/// - `address`: the router's own address.  It is the spender for every
///   token it pulls and the caller of every pair operation it performs.
/// - `wrapped_native`: the token that stands in for the native currency
///   in pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouterConfig {
    address: Address,
    wrapped_native: Address,
}

impl RouterConfig {
    /// Creates a new `RouterConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either address is
    /// zero or both are the same.
    pub fn new(address: Address, wrapped_native: Address) -> Result<Self, AmmError> {
        let config = Self {
            address,
            wrapped_native,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on a zero or duplicated
    /// address.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "router address must be non-zero",
            ));
        }
        if self.wrapped_native.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "wrapped native token must be non-zero",
            ));
        }
        if self.address == self.wrapped_native {
            return Err(AmmError::InvalidConfiguration(
                "router cannot be its own wrapped native token",
            ));
        }
        Ok(())
    }

    /// Returns the router address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the wrapped native token.
    #[must_use]
    pub const fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ROUTER: Address = address!("0x0000000000000000000000000000000000000777");
    const WETH: Address = address!("0x000000000000000000000000000000000000eeee");

    #[test]
    fn valid_config() {
        let cfg = RouterConfig::new(ROUTER, WETH);
        assert!(cfg.is_ok());
        assert_eq!(cfg.map(|c| c.wrapped_native()), Ok(WETH));
    }

    #[test]
    fn invalid_configs_rejected() {
        assert!(RouterConfig::new(Address::ZERO, WETH).is_err());
        assert!(RouterConfig::new(ROUTER, Address::ZERO).is_err());
        assert!(RouterConfig::new(ROUTER, ROUTER).is_err());
    }
}
