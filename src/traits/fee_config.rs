//! Source of the protocol-fee recipient.

use alloy_primitives::Address;

/// Anything that can say where protocol-fee shares go.
///
/// Implemented by the registry and by the
/// [`FeeRecipient`](crate::factory::FeeRecipient) handle it shares with its
/// pairs.
pub trait FeeConfig {
    /// Returns the fee recipient, or `None` when the protocol fee is off.
    #[must_use]
    fn fee_to(&self) -> Option<Address>;
}
