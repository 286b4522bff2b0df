//! Configuration structs for the registry and the router.
//!
//! Each struct is a validated blueprint: [`RegistryConfig::new`] and
//! [`RouterConfig::new`] reject unusable values up front, and the
//! components are built from them through
//! [`FromConfig`](crate::traits::FromConfig).

mod registry;
mod router;

pub use registry::{DEFAULT_PAIR_CODE_HASH, RegistryConfig};
pub use router::RouterConfig;
