//! Capability traits at the crate's seams.
//!
//! The pair engine, registry, and router reach their collaborators only
//! through these traits:
//!
//! - [`TokenLedger`]: fungible-token balances and transfers.
//! - [`WrappedNative`]: native currency and its wrapped token.
//! - [`SwapCallee`]: flash-swap callback.
//! - [`FeeConfig`]: protocol-fee recipient lookup.
//! - [`PairAddressDeriver`]: deterministic pair addressing.
//! - [`FromConfig`]: construction from a validated configuration.

mod address_deriver;
mod fee_config;
mod from_config;
mod swap_callee;
mod token_ledger;
mod wrapped_native;

pub use address_deriver::PairAddressDeriver;
pub use fee_config::FeeConfig;
pub use from_config::FromConfig;
pub use swap_callee::SwapCallee;
pub use token_ledger::TokenLedger;
pub use wrapped_native::WrappedNative;
