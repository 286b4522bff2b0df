//! Pair creation and registry administration.
//!
//! The [`PairRegistry`] creates at most one [`Pair`](crate::pair::Pair)
//! per token set, places it at a deterministic address, and owns the
//! protocol-fee switch.  Every administrative operation is gated by
//! [`Role`](crate::domain::Role) membership kept in an
//! [`AccessControl`] table.
//!
//! # Usage
//!
//! ```rust
//! use alloy_primitives::address;
//! use pairswap::config::RegistryConfig;
//! use pairswap::domain::{CallContext, Role};
//! use pairswap::factory::PairRegistry;
//!
//! let admin = address!("0x000000000000000000000000000000000000ad01");
//! let creator = address!("0x00000000000000000000000000000000000c0de0");
//! let config = RegistryConfig::new(address!("0x00000000000000000000000000000000000000ff"), admin)
//!     .expect("valid config");
//! let mut registry = PairRegistry::new(&config).expect("registry");
//!
//! let mut ctx = CallContext::new(admin, 0);
//! registry
//!     .grant_role_batch(&mut ctx, Role::PairCreator, &[creator])
//!     .expect("admin may grant");
//! assert!(registry.can_create_pair(creator));
//! ```

mod access;
mod create2;
mod fee_recipient;
mod registry;

pub use access::AccessControl;
pub use create2::Create2Deriver;
pub use fee_recipient::FeeRecipient;
pub use registry::PairRegistry;
