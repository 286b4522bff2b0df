//! Checked arithmetic trait for 256-bit token quantities.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking or wrapping on overflow, underflow, or division by zero.
//! Every reserve, balance, and share computation in the crate goes through
//! it; only the price accumulators wrap on purpose.
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use pairswap::math::CheckedArithmetic;
//!
//! let a = U256::from(100u8);
//! let b = U256::from(200u8);
//! assert_eq!(a.safe_add(b, "sum"), Ok(U256::from(300u16)));
//! assert!(a.safe_sub(b, "diff").is_err());
//! ```

use alloy_primitives::U256;

use crate::error::AmmError;

/// Fallible arithmetic for [`U256`] quantities.
///
/// Every method takes a static label naming the quantity being computed;
/// the label ends up in the [`AmmError::Overflow`] / [`AmmError::Underflow`]
/// payload so a failing step can be identified from the error alone.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation or wrapping**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_add(self, other: Self, what: &'static str) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(self, other: Self, what: &'static str) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_mul(self, other: Self, what: &'static str) -> Result<Self, AmmError>;

    /// Checked floor division.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(self, other: Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(self, other: Self, what: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other).ok_or(AmmError::Overflow(what))
    }

    #[inline]
    fn safe_sub(self, other: Self, what: &'static str) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::Underflow(what))
    }

    #[inline]
    fn safe_mul(self, other: Self, what: &'static str) -> Result<Self, AmmError> {
        self.checked_mul(other).ok_or(AmmError::Overflow(what))
    }

    #[inline]
    fn safe_div(self, other: Self) -> Result<Self, AmmError> {
        self.checked_div(other).ok_or(AmmError::DivisionByZero)
    }
}
