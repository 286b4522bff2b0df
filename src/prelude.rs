//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```

pub use alloy_primitives::{Address, B256, U256};

pub use crate::config::{RegistryConfig, RouterConfig};
pub use crate::domain::{
    AddLiquidity, CallContext, Event, RemoveLiquidity, Reserves, Role, Route, TokenPair,
};
pub use crate::error::{AmmError, Result};
pub use crate::factory::{Create2Deriver, FeeRecipient, PairRegistry};
pub use crate::ledger::InMemoryLedger;
pub use crate::pair::{FlashSwap, MINIMUM_LIQUIDITY, Pair, Transaction};
pub use crate::router::Router;
pub use crate::traits::{
    FeeConfig, FromConfig, PairAddressDeriver, SwapCallee, TokenLedger, WrappedNative,
};
