//! Unified error types for the pairswap library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Variants fall into four groups:
//!
//! - **Preconditions**: bad inputs rejected before any state changes
//!   (identical or zero addresses, zero amounts, slippage, deadlines).
//! - **Invariant**: [`AmmError::K`], the constant-product check failing
//!   after an optimistic swap.
//! - **Authorization**: missing role or paused registry.
//! - **Arithmetic**: checked overflow, underflow, and division by zero.

use alloy_primitives::Address;
use thiserror::Error;

use crate::domain::Role;

/// Convenience alias used throughout the crate.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;

/// Every failure the pair engine, registry, and router can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- preconditions -------------------------------------------------------
    /// The two tokens of a pair are the same address.
    #[error("identical addresses")]
    IdenticalAddresses,

    /// A token or recipient is the zero address.
    #[error("zero address")]
    ZeroAddress,

    /// A pair for the token set is already registered.
    #[error("pair already exists")]
    PairExists,

    /// No pair is registered for a token set on the requested path.
    #[error("pair does not exist")]
    PairNotFound,

    /// Requested (or computed) output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// No input was received, or the quoted input is zero.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Reserves cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A quote was requested for a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// Optimal amount of token A is below the caller's minimum.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// Optimal amount of token B is below the caller's minimum.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// Required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// A mint would issue zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A burn would return zero of either token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Swap recipient is one of the pair's own tokens.
    #[error("invalid recipient")]
    InvalidTo,

    /// A router path is shorter than two tokens or does not start/end at
    /// the wrapped native token where required.
    #[error("invalid path")]
    InvalidPath,

    /// The caller-supplied deadline has passed.
    #[error("transaction expired")]
    Expired,

    /// A token or share balance is too small for a transfer.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A spender's allowance is too small for a delegated transfer.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A batch role update was submitted with no addresses.
    #[error("empty batch")]
    EmptyBatch,

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    // -- invariant -----------------------------------------------------------
    /// The fee-adjusted constant-product invariant does not hold.
    #[error("K")]
    K,

    // -- authorization -------------------------------------------------------
    /// `account` lacks `role`.
    #[error("account {account} is missing role {role}")]
    Unauthorized {
        /// Role the operation requires.
        role: Role,
        /// Account that attempted the operation.
        account: Address,
    },

    /// The registry is paused.
    #[error("enforced pause")]
    EnforcedPause,

    /// The registry is not paused.
    #[error("expected pause")]
    ExpectedPause,

    // -- concurrency ---------------------------------------------------------
    /// A mutating call re-entered a pair that is already executing one.
    #[error("locked")]
    Locked,

    // -- arithmetic ----------------------------------------------------------
    /// Arithmetic result exceeds its representable range.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic result would be negative.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_short_reasons() {
        assert_eq!(AmmError::K.to_string(), "K");
        assert_eq!(AmmError::Locked.to_string(), "locked");
        assert_eq!(
            AmmError::Overflow("reserve0").to_string(),
            "overflow: reserve0"
        );
    }

    #[test]
    fn unauthorized_names_role_and_account() {
        let err = AmmError::Unauthorized {
            role: Role::Pauser,
            account: Address::ZERO,
        };
        let msg = err.to_string();
        assert!(msg.contains("PAUSER_ROLE"));
        assert!(msg.contains("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(AmmError::PairExists, AmmError::PairExists);
        assert_ne!(AmmError::PairExists, AmmError::PairNotFound);
    }
}
