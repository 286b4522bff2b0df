//! In-memory reference ledger.
//!
//! [`InMemoryLedger`] implements [`TokenLedger`] and [`WrappedNative`]
//! over plain hash maps.  It backs the crate's tests and is suitable for
//! simulations: cloning it is how pair and router operations stage their
//! writes.
//!
//! Tokens do not need to be declared; any address is a token once it has
//! been minted.  A per-token transfer fee can be configured to model
//! fee-on-transfer tokens.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::{TokenLedger, WrappedNative};

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: u64 = 10_000;

/// Hash-map backed token and native-currency ledger.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::{U256, address};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::traits::TokenLedger;
///
/// let token = address!("0x1000000000000000000000000000000000000000");
/// let alice = address!("0x00000000000000000000000000000000000a11ce");
/// let bob = address!("0x0000000000000000000000000000000000000b0b");
///
/// let mut ledger = InMemoryLedger::default();
/// ledger.mint(token, alice, U256::from(100u8)).expect("mint");
/// ledger.transfer(token, alice, bob, U256::from(40u8)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(token, alice), U256::from(60u8));
/// assert_eq!(ledger.balance_of(token, bob), U256::from(40u8));
/// assert_eq!(ledger.total_supply(token), U256::from(100u8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InMemoryLedger {
    wrapped_native: Address,
    balances: HashMap<(Address, Address), U256>,
    supplies: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    transfer_fees: HashMap<Address, u16>,
    native: HashMap<Address, U256>,
}

impl InMemoryLedger {
    /// Creates an empty ledger whose wrapped native token lives at
    /// `wrapped_native`.
    #[must_use]
    pub fn new(wrapped_native: Address) -> Self {
        Self {
            wrapped_native,
            ..Self::default()
        }
    }

    /// Creates `amount` of `token` out of thin air for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply or balance overflows.
    pub fn mint(&mut self, token: Address, to: Address, amount: U256) -> Result<(), AmmError> {
        let supply = self.total_supply(token).safe_add(amount, "token supply")?;
        let balance = self.balance_of(token, to).safe_add(amount, "token balance")?;
        self.supplies.insert(token, supply);
        self.balances.insert((token, to), balance);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s `token`.
    ///
    /// `U256::MAX` is an infinite allowance that is never consumed.
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((token, owner, spender), amount);
    }

    /// Returns `spender`'s remaining allowance over `owner`'s `token`.
    #[must_use]
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Makes `token` burn `bps` basis points of every transferred amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `bps` exceeds 10 000.
    pub fn set_transfer_fee(&mut self, token: Address, bps: u16) -> Result<(), AmmError> {
        if u64::from(bps) > BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(
                "transfer fee cannot exceed 100%",
            ));
        }
        self.transfer_fees.insert(token, bps);
        Ok(())
    }

    /// Credits `owner` with `amount` of native currency.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance overflows.
    pub fn fund_native(&mut self, owner: Address, amount: U256) -> Result<(), AmmError> {
        let balance = self.native_balance(owner).safe_add(amount, "native balance")?;
        self.native.insert(owner, balance);
        Ok(())
    }

    fn transfer_fee(&self, token: Address, amount: U256) -> Result<U256, AmmError> {
        let Some(bps) = self.transfer_fees.get(&token) else {
            return Ok(U256::ZERO);
        };
        amount
            .safe_mul(U256::from(*bps), "transfer fee")?
            .safe_div(U256::from(BPS_DENOMINATOR))
    }

    fn debit(&mut self, token: Address, owner: Address, amount: U256) -> Result<(), AmmError> {
        let balance = self
            .balance_of(token, owner)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.balances.insert((token, owner), balance);
        Ok(())
    }

    fn credit(&mut self, token: Address, owner: Address, amount: U256) -> Result<(), AmmError> {
        let balance = self.balance_of(token, owner).safe_add(amount, "token balance")?;
        self.balances.insert((token, owner), balance);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self, token: Address) -> U256 {
        self.supplies.get(&token).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError> {
        let fee = self.transfer_fee(token, amount)?;
        self.debit(token, from, amount)?;
        self.credit(token, to, amount - fee)?;
        if !fee.is_zero() {
            let supply = self.total_supply(token).safe_sub(fee, "token supply")?;
            self.supplies.insert(token, supply);
        }
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError> {
        if spender != from {
            let allowed = self.allowance(token, from, spender);
            if allowed < amount {
                return Err(AmmError::InsufficientAllowance);
            }
            if allowed != U256::MAX {
                self.approve(token, from, spender, allowed - amount);
            }
        }
        self.transfer(token, from, to, amount)
    }
}

impl WrappedNative for InMemoryLedger {
    fn wrapped_token(&self) -> Address {
        self.wrapped_native
    }

    fn native_balance(&self, owner: Address) -> U256 {
        self.native.get(&owner).copied().unwrap_or_default()
    }

    fn transfer_native(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AmmError> {
        let from_balance = self
            .native_balance(from)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.native.insert(from, from_balance);
        let to_balance = self.native_balance(to).safe_add(amount, "native balance")?;
        self.native.insert(to, to_balance);
        Ok(())
    }

    fn deposit(&mut self, holder: Address, amount: U256) -> Result<(), AmmError> {
        let native = self
            .native_balance(holder)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.mint(self.wrapped_native, holder, amount)?;
        self.native.insert(holder, native);
        Ok(())
    }

    fn withdraw(&mut self, holder: Address, amount: U256) -> Result<(), AmmError> {
        let wrapped = self.wrapped_native;
        self.debit(wrapped, holder, amount)?;
        let supply = self.total_supply(wrapped).safe_sub(amount, "wrapped supply")?;
        self.supplies.insert(wrapped, supply);
        self.fund_native(holder, amount)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TOKEN: Address = address!("0x1000000000000000000000000000000000000000");
    const WETH: Address = address!("0x000000000000000000000000000000000000eeee");
    const ALICE: Address = address!("0x00000000000000000000000000000000000a11ce");
    const BOB: Address = address!("0x0000000000000000000000000000000000000b0b");

    fn funded() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new(WETH);
        let Ok(()) = ledger.mint(TOKEN, ALICE, U256::from(1_000u16)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = funded();
        assert!(ledger.transfer(TOKEN, ALICE, BOB, U256::from(400u16)).is_ok());
        assert_eq!(ledger.balance_of(TOKEN, ALICE), U256::from(600u16));
        assert_eq!(ledger.balance_of(TOKEN, BOB), U256::from(400u16));
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let mut ledger = funded();
        assert_eq!(
            ledger.transfer(TOKEN, ALICE, BOB, U256::from(1_001u16)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(ledger.balance_of(TOKEN, ALICE), U256::from(1_000u16));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = funded();
        ledger.approve(TOKEN, ALICE, BOB, U256::from(500u16));
        assert!(
            ledger
                .transfer_from(TOKEN, BOB, ALICE, BOB, U256::from(200u8))
                .is_ok()
        );
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), U256::from(300u16));
        assert_eq!(
            ledger.transfer_from(TOKEN, BOB, ALICE, BOB, U256::from(301u16)),
            Err(AmmError::InsufficientAllowance)
        );
    }

    #[test]
    fn infinite_allowance_is_not_consumed() {
        let mut ledger = funded();
        ledger.approve(TOKEN, ALICE, BOB, U256::MAX);
        assert!(
            ledger
                .transfer_from(TOKEN, BOB, ALICE, BOB, U256::from(200u8))
                .is_ok()
        );
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), U256::MAX);
    }

    #[test]
    fn transfer_fee_is_burned() {
        let mut ledger = funded();
        assert!(ledger.set_transfer_fee(TOKEN, 100).is_ok());
        assert!(ledger.transfer(TOKEN, ALICE, BOB, U256::from(500u16)).is_ok());
        assert_eq!(ledger.balance_of(TOKEN, BOB), U256::from(495u16));
        assert_eq!(ledger.total_supply(TOKEN), U256::from(995u16));
        assert!(ledger.set_transfer_fee(TOKEN, 10_001).is_err());
    }

    #[test]
    fn deposit_and_withdraw_native() {
        let mut ledger = InMemoryLedger::new(WETH);
        assert!(ledger.fund_native(ALICE, U256::from(50u8)).is_ok());
        assert!(ledger.deposit(ALICE, U256::from(30u8)).is_ok());
        assert_eq!(ledger.native_balance(ALICE), U256::from(20u8));
        assert_eq!(ledger.balance_of(WETH, ALICE), U256::from(30u8));
        assert_eq!(ledger.total_supply(WETH), U256::from(30u8));

        assert!(ledger.withdraw(ALICE, U256::from(10u8)).is_ok());
        assert_eq!(ledger.native_balance(ALICE), U256::from(30u8));
        assert_eq!(ledger.total_supply(WETH), U256::from(20u8));
        assert_eq!(
            ledger.deposit(ALICE, U256::from(31u8)),
            Err(AmmError::InsufficientBalance)
        );
    }
}
