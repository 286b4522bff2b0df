//! CREATE2-style pair addressing.

use alloy_primitives::{Address, B256, keccak256};

use crate::domain::TokenPair;
use crate::traits::PairAddressDeriver;

/// Derives pair addresses the way a CREATE2 deployment would:
///
/// ```text
/// salt = keccak256(token0 ++ token1)
/// addr = keccak256(0xff ++ registry ++ salt ++ code_hash)[12..]
/// ```
///
/// Anyone who knows the registry address and the code hash can compute a
/// pair's address off-line, without querying the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Create2Deriver;

impl Create2Deriver {
    /// The salt for `tokens`: `keccak256` of the two sorted addresses,
    /// tightly packed.
    #[must_use]
    pub fn salt(tokens: &TokenPair) -> B256 {
        keccak256(tokens.packed())
    }
}

impl PairAddressDeriver for Create2Deriver {
    fn derive(&self, registry: Address, tokens: &TokenPair, code_hash: B256) -> Address {
        registry.create2(Self::salt(tokens), code_hash)
    }
}
