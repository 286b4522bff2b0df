//! Fungible-token capability consumed by pairs and the router.
//!
//! [`TokenLedger`] is the narrow interface through which the pair engine
//! and the router reach the token contracts they trade.  It covers many
//! tokens at once (every call names the token) and makes the acting
//! account explicit (`from` / `spender`), replacing the implicit
//! `msg.sender` of an on-chain token call.
//!
//! # Trust model
//!
//! The pair engine never trusts its own bookkeeping of what was
//! transferred: after every movement it re-reads
//! [`TokenLedger::balance_of`] for its own address and derives deltas from
//! that.  Fee-on-transfer and rebasing tokens are therefore tolerated.
//!
//! # Staging
//!
//! Operations that must be all-or-nothing (swaps, burns, router calls)
//! run against a clone of the ledger and write it back only on success,
//! which is why mutating entry points bound `L: TokenLedger + Clone`.

use alloy_primitives::{Address, U256};

use crate::error::AmmError;

/// Balance, supply, and transfer operations over a set of fungible tokens.
pub trait TokenLedger {
    /// Returns `owner`'s balance of `token`.
    #[must_use]
    fn balance_of(&self, token: Address, owner: Address) -> U256;

    /// Returns the total supply of `token`.
    #[must_use]
    fn total_supply(&self, token: Address) -> U256;

    /// Moves `amount` of `token` from `from` to `to`, acting as `from`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`AmmError::Overflow`] if the recipient balance would overflow.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too small.
    /// - Any error of [`TokenLedger::transfer`].
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError>;
}
