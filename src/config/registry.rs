//! Configuration for the pair registry.

use alloy_primitives::{Address, B256, b256};

use crate::error::AmmError;

/// Code hash used for pair-address derivation when none is supplied:
/// `keccak256("pairswap.Pair")`.
pub const DEFAULT_PAIR_CODE_HASH: B256 =
    b256!("0xe2fc480c685dde6f1a5713b205df59a1b145dc8100575a60fd58a0f54942af4d");

/// Configuration for a [`PairRegistry`](crate::factory::PairRegistry).
///
/// - `address`: the registry's own address; an input to every derived
///   pair address.
/// - `admin`: receives every role and becomes the initial fee setter.
/// - `pair_code_hash`: the code-hash input of pair-address derivation.
///
/// # Validation
///
/// Neither address may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryConfig {
    address: Address,
    admin: Address,
    pair_code_hash: B256,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig` using [`DEFAULT_PAIR_CODE_HASH`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either address is
    /// zero.
    pub fn new(address: Address, admin: Address) -> Result<Self, AmmError> {
        let config = Self {
            address,
            admin,
            pair_code_hash: DEFAULT_PAIR_CODE_HASH,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the code hash used for pair-address derivation.
    #[must_use]
    pub const fn with_pair_code_hash(mut self, pair_code_hash: B256) -> Self {
        self.pair_code_hash = pair_code_hash;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either address is
    /// zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "registry address must be non-zero",
            ));
        }
        if self.admin.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "registry admin must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the registry address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the initial admin.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the pair code hash.
    #[must_use]
    pub const fn pair_code_hash(&self) -> B256 {
        self.pair_code_hash
    }
}
