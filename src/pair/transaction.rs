//! All-or-nothing execution of multi-step operations.

use std::sync::Arc;

use super::engine::Pair;
use super::state::PairState;
use crate::domain::CallContext;
use crate::error::AmmError;

/// Scratch state for one all-or-nothing operation.
///
/// Ledger writes go to a staged clone; every touched pair is checkpointed
/// before its first mutation; the event log position is remembered.  On
/// failure the pairs are restored in reverse order, the log is truncated,
/// and the staged ledger is dropped, so nothing of the operation remains
/// visible.
///
/// The router runs each of its operations in one, and
/// [`Pair::swap`] hands one to its flash-swap callee.  Call
/// [`touch`](Self::touch) on every pair before mutating it inside the
/// transaction; the pair being swapped is already covered.
#[derive(Debug)]
pub struct Transaction<L> {
    staged: L,
    checkpoints: Vec<(Arc<Pair>, PairState)>,
    mark: usize,
}

impl<L: Clone> Transaction<L> {
    /// Runs `op` inside a transaction over `ledger`.
    pub(crate) fn run<T, F>(ctx: &mut CallContext, ledger: &mut L, op: F) -> Result<T, AmmError>
    where
        F: FnOnce(&mut CallContext, &mut Self) -> Result<T, AmmError>,
    {
        let mut tx = Self {
            staged: ledger.clone(),
            checkpoints: Vec::new(),
            mark: ctx.event_mark(),
        };
        match op(ctx, &mut tx) {
            Ok(value) => {
                *ledger = tx.staged;
                Ok(value)
            }
            Err(err) => {
                tx.rollback(ctx);
                Err(err)
            }
        }
    }
}

impl<L> Transaction<L> {
    /// The staged ledger.
    pub fn ledger(&mut self) -> &mut L {
        &mut self.staged
    }

    /// Checkpoints `pair` unless it already has been.
    pub fn touch(&mut self, pair: &Arc<Pair>) {
        if !self.checkpoints.iter().any(|(seen, _)| Arc::ptr_eq(seen, pair)) {
            self.checkpoints.push((Arc::clone(pair), pair.checkpoint()));
        }
    }

    fn rollback(self, ctx: &mut CallContext) {
        for (pair, state) in self.checkpoints.into_iter().rev() {
            pair.restore(state);
        }
        ctx.truncate_events(self.mark);
    }
}
