//! Shared protocol-fee switch.

use std::sync::Arc;

use alloy_primitives::Address;
use parking_lot::RwLock;

use crate::traits::FeeConfig;

/// Handle to the protocol-fee recipient.
///
/// The registry owns one and hands a clone to every pair it creates, so a
/// pair always sees the registry's current setting no matter who calls it.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct FeeRecipient(Arc<RwLock<Option<Address>>>);

impl FeeRecipient {
    /// Creates a handle with the protocol fee off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the recipient and returns the previous one.
    pub(crate) fn set(&self, fee_to: Option<Address>) -> Option<Address> {
        core::mem::replace(&mut *self.0.write(), fee_to)
    }
}

impl FeeConfig for FeeRecipient {
    fn fee_to(&self) -> Option<Address> {
        *self.0.read()
    }
}
