//! Events emitted by pairs and the registry.

use alloy_primitives::{Address, U256};

use super::Role;

/// A state-change notification for indexers and off-chain tooling.
///
/// Events are appended to the [`CallContext`](super::CallContext) only after
/// the emitting operation has fully succeeded; a failed operation leaves
/// the log untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// A new pair was registered.  `index` is the pair count after creation.
    PairCreated {
        /// Lower token address.
        token0: Address,
        /// Higher token address.
        token1: Address,
        /// Derived pair address.
        pair: Address,
        /// Number of pairs after this one was added.
        index: u64,
    },
    /// Liquidity was added to a pair.
    Mint {
        /// Emitting pair.
        pair: Address,
        /// Caller of `mint`.
        sender: Address,
        /// Deposited `token0`.
        amount0: U256,
        /// Deposited `token1`.
        amount1: U256,
    },
    /// Liquidity was removed from a pair.
    Burn {
        /// Emitting pair.
        pair: Address,
        /// Caller of `burn`.
        sender: Address,
        /// Withdrawn `token0`.
        amount0: U256,
        /// Withdrawn `token1`.
        amount1: U256,
        /// Recipient of the withdrawn tokens.
        to: Address,
    },
    /// A swap settled against a pair.
    Swap {
        /// Emitting pair.
        pair: Address,
        /// Caller of `swap`.
        sender: Address,
        /// `token0` received by the pair.
        amount0_in: U256,
        /// `token1` received by the pair.
        amount1_in: U256,
        /// `token0` sent out.
        amount0_out: U256,
        /// `token1` sent out.
        amount1_out: U256,
        /// Recipient of the output.
        to: Address,
    },
    /// A pair's reserves were updated.
    Sync {
        /// Emitting pair.
        pair: Address,
        /// New `reserve0`.
        reserve0: U256,
        /// New `reserve1`.
        reserve1: U256,
    },
    /// Liquidity shares moved.  Mints come from, and burns go to, the zero
    /// address.
    Transfer {
        /// Share token (the pair address).
        token: Address,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
        /// Shares moved.
        value: U256,
    },
    /// A share allowance was set.
    Approval {
        /// Share token (the pair address).
        token: Address,
        /// Share owner.
        owner: Address,
        /// Approved spender.
        spender: Address,
        /// New allowance.
        value: U256,
    },
    /// The protocol-fee recipient changed.
    FeeToUpdated {
        /// Previous recipient.
        old: Option<Address>,
        /// New recipient.
        new: Option<Address>,
    },
    /// The fee setter changed.
    FeeToSetterUpdated {
        /// Previous setter.
        old: Address,
        /// New setter.
        new: Address,
    },
    /// `account` gained `role`.
    RoleGranted {
        /// Role granted.
        role: Role,
        /// Account receiving the role.
        account: Address,
        /// Caller that granted it.
        sender: Address,
    },
    /// `account` lost `role`.
    RoleRevoked {
        /// Role revoked.
        role: Role,
        /// Account losing the role.
        account: Address,
        /// Caller that revoked it.
        sender: Address,
    },
    /// Pair creation was paused.
    Paused {
        /// Caller that paused.
        account: Address,
    },
    /// Pair creation was resumed.
    Unpaused {
        /// Caller that unpaused.
        account: Address,
    },
}
