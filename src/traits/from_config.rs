//! Construction from a validated configuration.
//!
//! [`FromConfig`] gives the registry and the router a uniform constructor
//! from their configuration structs:
//!
//! ```text
//! PairRegistry::from_config(&RegistryConfig) -> PairRegistry
//! Router::from_config(&RouterConfig)         -> Router
//! ```
//!
//! There is no blanket implementation; each pairing is explicit.

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
///
/// Implementations re-validate the configuration, so a value built through
/// this trait always starts in a valid state.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] if the configuration is
/// invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any parameter is
    /// unusable.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
