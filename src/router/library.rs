//! Pricing helpers shared by the router and by off-line quoting.
//!
//! All functions are pure: the pair-backed ones only read reserves.
//!
//! # Formulas
//!
//! ```text
//! quote          = amount_a · reserve_b / reserve_a
//! get_amount_out = amount_in·997 · reserve_out / (reserve_in·1000 + amount_in·997)
//! get_amount_in  = reserve_in · amount_out · 1000 / ((reserve_out − amount_out) · 997) + 1
//! ```
//!
//! `get_amount_out` rounds down and `get_amount_in` rounds up, so a quoted
//! trade always satisfies the pair's invariant check.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use crate::domain::TokenPair;
use crate::error::AmmError;
use crate::factory::PairRegistry;
use crate::math::CheckedArithmetic;
use crate::pair::Pair;
use crate::traits::PairAddressDeriver;

/// Input multiplier after the 0.3% fee.
const FEE_MULTIPLIER: U256 = U256::from_limbs([997, 0, 0, 0]);

/// Fee denominator.
const FEE_DENOMINATOR: U256 = U256::from_limbs([1_000, 0, 0, 0]);

/// Orders two token addresses the way pairs do.
///
/// # Errors
///
/// Returns [`AmmError::IdenticalAddresses`] or [`AmmError::ZeroAddress`].
pub fn sort_tokens(token_a: Address, token_b: Address) -> Result<(Address, Address), AmmError> {
    let tokens = TokenPair::new(token_a, token_b)?;
    Ok((tokens.token0(), tokens.token1()))
}

/// Amount of the other asset equivalent to `amount_a` at the current
/// reserve ratio, without fees.
///
/// # Errors
///
/// - [`AmmError::InsufficientAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256, AmmError> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    amount_a
        .safe_mul(reserve_b, "quote numerator")?
        .safe_div(reserve_a)
}

/// Maximum output for an exact input, after the 0.3% fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn get_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> Result<U256, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let amount_in_with_fee = amount_in.safe_mul(FEE_MULTIPLIER, "input after fee")?;
    let numerator = amount_in_with_fee.safe_mul(reserve_out, "amount out numerator")?;
    let denominator = reserve_in
        .safe_mul(FEE_DENOMINATOR, "amount out denominator")?
        .safe_add(amount_in_with_fee, "amount out denominator")?;
    numerator.safe_div(denominator)
}

/// Minimum input for an exact output, after the 0.3% fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` would drain `reserve_out`.
pub fn get_amount_in(
    amount_out: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> Result<U256, AmmError> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let numerator = reserve_in
        .safe_mul(amount_out, "amount in numerator")?
        .safe_mul(FEE_DENOMINATOR, "amount in numerator")?;
    let denominator = (reserve_out - amount_out).safe_mul(FEE_MULTIPLIER, "amount in denominator")?;
    numerator
        .safe_div(denominator)?
        .safe_add(U256::from(1u8), "amount in")
}

/// Looks up the registered pair for two tokens.
///
/// # Errors
///
/// - [`AmmError::IdenticalAddresses`] / [`AmmError::ZeroAddress`] for an
///   invalid token pair.
/// - [`AmmError::PairNotFound`] if the pair has not been created.
pub fn pair_for<D: PairAddressDeriver>(
    registry: &PairRegistry<D>,
    token_a: Address,
    token_b: Address,
) -> Result<Arc<Pair>, AmmError> {
    sort_tokens(token_a, token_b)?;
    registry
        .get_pair(token_a, token_b)
        .ok_or(AmmError::PairNotFound)
}

/// Reserves of the pair for two tokens, oriented as `(reserve_a,
/// reserve_b)`.
///
/// # Errors
///
/// See [`pair_for`].
pub fn get_reserves<D: PairAddressDeriver>(
    registry: &PairRegistry<D>,
    token_a: Address,
    token_b: Address,
) -> Result<(U256, U256), AmmError> {
    let pair = pair_for(registry, token_a, token_b)?;
    pair.get_reserves().oriented(pair.token0(), pair.token1(), token_a)
}

/// Chains [`get_amount_out`] along `path`.  Element `i` of the result is
/// the amount of `path[i]` moving through the route; the first is
/// `amount_in`.
///
/// # Errors
///
/// - [`AmmError::InvalidPath`] if `path` has fewer than two tokens.
/// - [`AmmError::PairNotFound`] if a hop has no pair.
/// - Any error from [`get_amount_out`].
pub fn get_amounts_out<D: PairAddressDeriver>(
    registry: &PairRegistry<D>,
    amount_in: U256,
    path: &[Address],
) -> Result<Vec<U256>, AmmError> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    let mut amount = amount_in;
    for hop in path.windows(2) {
        let (reserve_in, reserve_out) = get_reserves(registry, hop[0], hop[1])?;
        amount = get_amount_out(amount, reserve_in, reserve_out)?;
        amounts.push(amount);
    }
    Ok(amounts)
}

/// Chains [`get_amount_in`] backwards along `path`.  The last element of
/// the result is `amount_out`.
///
/// # Errors
///
/// - [`AmmError::InvalidPath`] if `path` has fewer than two tokens.
/// - [`AmmError::PairNotFound`] if a hop has no pair.
/// - Any error from [`get_amount_in`].
pub fn get_amounts_in<D: PairAddressDeriver>(
    registry: &PairRegistry<D>,
    amount_out: U256,
    path: &[Address],
) -> Result<Vec<U256>, AmmError> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = vec![U256::ZERO; path.len()];
    let mut amount = amount_out;
    amounts[path.len() - 1] = amount;
    for i in (1..path.len()).rev() {
        let (reserve_in, reserve_out) = get_reserves(registry, path[i - 1], path[i])?;
        amount = get_amount_in(amount, reserve_in, reserve_out)?;
        amounts[i - 1] = amount;
    }
    Ok(amounts)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TOKEN_A: Address = address!("0x1000000000000000000000000000000000000000");
    const TOKEN_B: Address = address!("0x2000000000000000000000000000000000000000");

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(1_000_000_000_000_000_000u64)
    }

    // -- sort_tokens ----------------------------------------------------------

    #[test]
    fn sort_tokens_orders_and_validates() {
        assert_eq!(sort_tokens(TOKEN_B, TOKEN_A), Ok((TOKEN_A, TOKEN_B)));
        assert_eq!(
            sort_tokens(TOKEN_A, TOKEN_A),
            Err(AmmError::IdenticalAddresses)
        );
        assert_eq!(
            sort_tokens(Address::ZERO, TOKEN_A),
            Err(AmmError::ZeroAddress)
        );
    }

    // -- quote ----------------------------------------------------------------

    #[test]
    fn quote_is_proportional() {
        assert_eq!(
            quote(U256::from(1u8), U256::from(100u8), U256::from(200u8)),
            Ok(U256::from(2u8))
        );
        assert_eq!(
            quote(U256::ZERO, U256::from(100u8), U256::from(200u8)),
            Err(AmmError::InsufficientAmount)
        );
        assert_eq!(
            quote(U256::from(1u8), U256::ZERO, U256::from(200u8)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    // -- get_amount_out -------------------------------------------------------

    #[test]
    fn amount_out_vectors() {
        let vectors: [(u64, u64, u64, u64); 7] = [
            (1, 5, 10, 1_662_497_915_624_478_906),
            (1, 10, 5, 453_305_446_940_074_565),
            (2, 5, 10, 2_851_015_155_847_869_602),
            (2, 10, 5, 831_248_957_812_239_453),
            (1, 10, 10, 906_610_893_880_149_131),
            (1, 100, 100, 987_158_034_397_061_298),
            (1, 1000, 1000, 996_006_981_039_903_216),
        ];
        for (amount_in, reserve_in, reserve_out, expected) in vectors {
            assert_eq!(
                get_amount_out(ether(amount_in), ether(reserve_in), ether(reserve_out)),
                Ok(U256::from(expected)),
                "{amount_in} in against {reserve_in}/{reserve_out}"
            );
        }
    }

    #[test]
    fn amount_out_small_values() {
        assert_eq!(
            get_amount_out(U256::from(2u8), U256::from(100u8), U256::from(100u8)),
            Ok(U256::from(1u8))
        );
        assert_eq!(
            get_amount_out(U256::ZERO, U256::from(100u8), U256::from(100u8)),
            Err(AmmError::InsufficientInputAmount)
        );
        assert_eq!(
            get_amount_out(U256::from(2u8), U256::ZERO, U256::from(100u8)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    // -- get_amount_in --------------------------------------------------------

    #[test]
    fn amount_in_rounds_up() {
        assert_eq!(
            get_amount_in(U256::from(1u8), U256::from(100u8), U256::from(100u8)),
            Ok(U256::from(2u8))
        );
        assert_eq!(
            get_amount_in(U256::ZERO, U256::from(100u8), U256::from(100u8)),
            Err(AmmError::InsufficientOutputAmount)
        );
        assert_eq!(
            get_amount_in(U256::from(100u8), U256::from(100u8), U256::from(100u8)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn amount_in_inverts_amount_out() {
        let out = get_amount_out(ether(1), ether(5), ether(10));
        let Ok(out) = out else {
            panic!("amount out");
        };
        let Ok(needed) = get_amount_in(out, ether(5), ether(10)) else {
            panic!("amount in");
        };
        assert!(needed <= ether(1));
        assert!(ether(1) - needed <= U256::from(1u8));
    }
}
