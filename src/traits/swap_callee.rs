//! Flash-swap callback.

use alloy_primitives::{Address, U256};

use crate::domain::CallContext;
use crate::error::AmmError;
use crate::pair::Transaction;

/// Receiver of a flash swap.
///
/// When [`Pair::swap`](crate::pair::Pair::swap) is given a callee, the
/// requested outputs are transferred first and then `on_swap` runs inside
/// the swap's [`Transaction`].  The callee must leave the pair holding
/// enough input for the constant-product check to pass; otherwise the
/// whole swap is discarded: the staged ledger, the events, and the state
/// of every pair the callee [`touch`](Transaction::touch)ed.
///
/// The callee may read the pair it was called from, but any mutating call
/// back into that pair fails with [`AmmError::Locked`].
pub trait SwapCallee<L> {
    /// Called after outputs have been sent to the swap recipient.
    ///
    /// `sender` is the caller of `swap`; `data` is forwarded untouched.
    /// Token movements go through `tx.ledger()`; other pairs must be
    /// touched on `tx` before they are mutated.
    ///
    /// # Errors
    ///
    /// Any error aborts the swap.
    fn on_swap(
        &mut self,
        ctx: &mut CallContext,
        tx: &mut Transaction<L>,
        sender: Address,
        amount0_out: U256,
        amount1_out: U256,
        data: &[u8],
    ) -> Result<(), AmmError>;
}
