//! Router liquidity requests.

use alloy_primitives::{Address, U256};

/// Parameters for adding liquidity through the router.
///
/// The router deposits `amount_a_desired` / `amount_b_desired` scaled down
/// to the pair's current ratio and fails if either side would fall below
/// its minimum.  For the native-currency variant, `token_b` must be the
/// wrapped native token and `amount_b_desired` is the native value sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddLiquidity {
    /// First token.
    pub token_a: Address,
    /// Second token.
    pub token_b: Address,
    /// Upper bound on `token_a` deposited.
    pub amount_a_desired: U256,
    /// Upper bound on `token_b` deposited.
    pub amount_b_desired: U256,
    /// Lower bound on `token_a` deposited.
    pub amount_a_min: U256,
    /// Lower bound on `token_b` deposited.
    pub amount_b_min: U256,
    /// Recipient of the minted shares.
    pub to: Address,
    /// Deadline (inclusive).
    pub deadline: u64,
}

/// Parameters for removing liquidity through the router.
///
/// For the native-currency variant, `token_b` must be the wrapped native
/// token; its proceeds are unwrapped before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoveLiquidity {
    /// First token.
    pub token_a: Address,
    /// Second token.
    pub token_b: Address,
    /// Shares to burn, pulled from the caller.
    pub liquidity: U256,
    /// Lower bound on `token_a` returned.
    pub amount_a_min: U256,
    /// Lower bound on `token_b` returned.
    pub amount_b_min: U256,
    /// Recipient of the withdrawn tokens.
    pub to: Address,
    /// Deadline (inclusive).
    pub deadline: u64,
}
