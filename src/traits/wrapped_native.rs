//! Native-currency wrapping capability used by the router.

use alloy_primitives::{Address, U256};

use super::TokenLedger;
use crate::error::AmmError;

/// A ledger that also tracks the chain's native currency and a wrapped
/// token representing it one-to-one.
///
/// Only the router's native-currency entry points use this trait; pairs
/// only ever see the wrapped token through [`TokenLedger`].
pub trait WrappedNative: TokenLedger {
    /// Address of the wrapped native token.
    #[must_use]
    fn wrapped_token(&self) -> Address;

    /// Returns `owner`'s native balance.
    #[must_use]
    fn native_balance(&self, owner: Address) -> U256;

    /// Moves native value between accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn transfer_native(&mut self, from: Address, to: Address, amount: U256)
    -> Result<(), AmmError>;

    /// Converts `amount` of `holder`'s native value into wrapped tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `holder` holds less
    /// native value than `amount`.
    fn deposit(&mut self, holder: Address, amount: U256) -> Result<(), AmmError>;

    /// Converts `amount` of `holder`'s wrapped tokens back into native value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `holder` holds fewer
    /// wrapped tokens than `amount`.
    fn withdraw(&mut self, holder: Address, amount: U256) -> Result<(), AmmError>;
}
