//! Deterministic pair-address derivation.

use alloy_primitives::{Address, B256};

use crate::domain::TokenPair;

/// Computes the address of a new pair.
///
/// Implementations must be pure: the same inputs always yield the same
/// address, independent of creation order or any other registry state.
/// The registry is generic over this trait so alternative schemes can be
/// injected; [`Create2Deriver`](crate::factory::Create2Deriver) is the
/// default.
pub trait PairAddressDeriver {
    /// Derives the pair address for `tokens` created by `registry`.
    #[must_use]
    fn derive(&self, registry: Address, tokens: &TokenPair, code_hash: B256) -> Address;
}
