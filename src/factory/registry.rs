//! The pair registry.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, B256};
use tracing::info;

use super::{AccessControl, Create2Deriver, FeeRecipient};
use crate::config::RegistryConfig;
use crate::domain::{CallContext, Event, Role, TokenPair};
use crate::error::AmmError;
use crate::pair::Pair;
use crate::traits::{FeeConfig, FromConfig, PairAddressDeriver};

/// Creates and indexes pairs, holds the protocol-fee configuration, and
/// gates both behind role-based access control and a pause switch.
///
/// At most one pair exists per unordered token set.  Pair addresses come
/// from the injected [`PairAddressDeriver`], [`Create2Deriver`] by default,
/// so they can be computed without asking the registry.
///
/// Every pair created here shares the registry's [`FeeRecipient`], so
/// [`set_fee_to`](Self::set_fee_to) takes effect on existing pairs at
/// once.  Clones of the registry share it too.
///
/// # Roles
///
/// | Operation | Required role |
/// |-----------|---------------|
/// | [`create_pair`](Self::create_pair) | [`Role::PairCreator`] |
/// | [`set_fee_to`](Self::set_fee_to) | [`Role::FeeManager`] or [`Role::Admin`] |
/// | [`set_fee_to_setter`](Self::set_fee_to_setter) | [`Role::Admin`] |
/// | [`grant_role_batch`](Self::grant_role_batch) / [`revoke_role_batch`](Self::revoke_role_batch) | [`Role::Admin`] |
/// | [`grant_role`](Self::grant_role) / [`revoke_role`](Self::revoke_role) | [`Role::DefaultAdmin`] |
/// | [`pause`](Self::pause) / [`unpause`](Self::unpause) | [`Role::Pauser`] |
/// | [`emergency_stop`](Self::emergency_stop) | [`Role::DefaultAdmin`] |
///
/// # Example
///
/// ```rust
/// use alloy_primitives::address;
/// use pairswap::config::RegistryConfig;
/// use pairswap::domain::CallContext;
/// use pairswap::factory::PairRegistry;
///
/// let registry_address = address!("0x00000000000000000000000000000000000000ff");
/// let admin = address!("0x000000000000000000000000000000000000ad01");
/// let token_a = address!("0x1000000000000000000000000000000000000000");
/// let token_b = address!("0x2000000000000000000000000000000000000000");
///
/// let config = RegistryConfig::new(registry_address, admin).expect("valid config");
/// let mut registry = PairRegistry::new(&config).expect("registry");
///
/// let mut ctx = CallContext::new(admin, 0);
/// let pair = registry.create_pair(&mut ctx, token_a, token_b).expect("created");
///
/// assert_eq!(registry.all_pairs_length(), 1);
/// assert_eq!(registry.get_pair(token_b, token_a).map(|p| p.address()), Some(pair));
/// ```
#[derive(Debug, Clone)]
pub struct PairRegistry<D = Create2Deriver> {
    address: Address,
    pair_code_hash: B256,
    deriver: D,
    fee_to: FeeRecipient,
    fee_to_setter: Address,
    pairs: HashMap<(Address, Address), Arc<Pair>>,
    all_pairs: Vec<Arc<Pair>>,
    access: AccessControl,
    paused: bool,
}

impl PairRegistry {
    /// Creates a registry using [`Create2Deriver`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: &RegistryConfig) -> Result<Self, AmmError> {
        Self::with_deriver(config, Create2Deriver)
    }
}

impl FromConfig<RegistryConfig> for PairRegistry {
    fn from_config(config: &RegistryConfig) -> Result<Self, AmmError> {
        Self::new(config)
    }
}

impl<D: PairAddressDeriver> PairRegistry<D> {
    /// Creates a registry that derives pair addresses with `deriver`.
    ///
    /// The configured admin receives every role and becomes the fee
    /// setter; the protocol fee starts off and the registry unpaused.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_deriver(config: &RegistryConfig, deriver: D) -> Result<Self, AmmError> {
        config.validate()?;
        info!(registry = %config.address(), admin = %config.admin(), "registry created");
        Ok(Self {
            address: config.address(),
            pair_code_hash: config.pair_code_hash(),
            deriver,
            fee_to: FeeRecipient::new(),
            fee_to_setter: config.admin(),
            pairs: HashMap::new(),
            all_pairs: Vec::new(),
            access: AccessControl::with_admin(config.admin()),
            paused: false,
        })
    }

    // -- pairs ----------------------------------------------------------------

    /// Creates the pair for `token_a` and `token_b` and returns its address.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks
    ///   [`Role::PairCreator`].
    /// - [`AmmError::EnforcedPause`] while paused.
    /// - [`AmmError::IdenticalAddresses`] / [`AmmError::ZeroAddress`] for
    ///   an invalid token pair.
    /// - [`AmmError::PairExists`] if the pair is already registered.
    pub fn create_pair(
        &mut self,
        ctx: &mut CallContext,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, AmmError> {
        self.access.check_role(Role::PairCreator, ctx.caller())?;
        if self.paused {
            return Err(AmmError::EnforcedPause);
        }
        let tokens = TokenPair::new(token_a, token_b)?;
        let (token0, token1) = (tokens.token0(), tokens.token1());
        if self.pairs.contains_key(&(token0, token1)) {
            return Err(AmmError::PairExists);
        }

        let address = self
            .deriver
            .derive(self.address, &tokens, self.pair_code_hash);
        let pair = Arc::new(Pair::with_fee_recipient(
            address,
            self.address,
            tokens,
            self.fee_to.clone(),
        ));
        self.pairs.insert((token0, token1), Arc::clone(&pair));
        self.pairs.insert((token1, token0), Arc::clone(&pair));
        self.all_pairs.push(pair);
        let index = self.all_pairs.len() as u64;

        info!(%token0, %token1, pair = %address, index, "pair created");
        ctx.emit(Event::PairCreated {
            token0,
            token1,
            pair: address,
            index,
        });
        Ok(address)
    }

    /// Looks up the pair for two tokens, in either order.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Arc<Pair>> {
        self.pairs.get(&(token_a, token_b)).cloned()
    }

    /// Computes where the pair for two tokens lives (or would live),
    /// whether or not it has been created.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAddresses`] or [`AmmError::ZeroAddress`].
    pub fn pair_address(&self, token_a: Address, token_b: Address) -> Result<Address, AmmError> {
        let tokens = TokenPair::new(token_a, token_b)?;
        Ok(self
            .deriver
            .derive(self.address, &tokens, self.pair_code_hash))
    }

    /// The `index`-th pair in creation order.
    #[must_use]
    pub fn all_pairs(&self, index: usize) -> Option<Arc<Pair>> {
        self.all_pairs.get(index).cloned()
    }

    /// Number of pairs created so far.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.all_pairs.len()
    }

    /// Every pair, in creation order.
    pub fn pairs(&self) -> impl Iterator<Item = &Arc<Pair>> {
        self.all_pairs.iter()
    }

    /// The registry's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The code-hash input of pair-address derivation.
    #[must_use]
    pub const fn pair_code_hash(&self) -> B256 {
        self.pair_code_hash
    }

    // -- protocol fee ---------------------------------------------------------

    /// The protocol-fee recipient, or `None` while the fee is off.
    #[must_use]
    pub fn fee_to(&self) -> Option<Address> {
        self.fee_to.fee_to()
    }

    /// The account nominally in charge of the protocol fee.
    #[must_use]
    pub const fn fee_to_setter(&self) -> Address {
        self.fee_to_setter
    }

    /// Sets (or, with `None`, clears) the protocol-fee recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless the caller
    /// [`can_manage_fees`](Self::can_manage_fees).
    pub fn set_fee_to(
        &mut self,
        ctx: &mut CallContext,
        fee_to: Option<Address>,
    ) -> Result<(), AmmError> {
        let caller = ctx.caller();
        if !self.can_manage_fees(caller) {
            return Err(AmmError::Unauthorized {
                role: Role::FeeManager,
                account: caller,
            });
        }
        let old = self.fee_to.set(fee_to);
        info!(?old, new = ?fee_to, "protocol fee recipient updated");
        ctx.emit(Event::FeeToUpdated { old, new: fee_to });
        Ok(())
    }

    /// Hands the fee setter over to `new_setter`, moving
    /// [`Role::FeeManager`] from the old setter to the new one.
    ///
    /// The old setter keeps fee rights only through any other role it
    /// holds, such as [`Role::Admin`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks [`Role::Admin`].
    /// - [`AmmError::ZeroAddress`] if `new_setter` is zero.
    pub fn set_fee_to_setter(
        &mut self,
        ctx: &mut CallContext,
        new_setter: Address,
    ) -> Result<(), AmmError> {
        let sender = ctx.caller();
        self.access.check_role(Role::Admin, sender)?;
        if new_setter.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let old = self.fee_to_setter;
        let mut events = Vec::with_capacity(3);
        if old != new_setter && self.access.revoke(Role::FeeManager, old) {
            events.push(Event::RoleRevoked {
                role: Role::FeeManager,
                account: old,
                sender,
            });
        }
        if self.access.grant(Role::FeeManager, new_setter) {
            events.push(Event::RoleGranted {
                role: Role::FeeManager,
                account: new_setter,
                sender,
            });
        }
        self.fee_to_setter = new_setter;
        events.push(Event::FeeToSetterUpdated {
            old,
            new: new_setter,
        });
        info!(%old, new = %new_setter, "fee setter updated");
        ctx.emit_all(events);
        Ok(())
    }

    // -- roles ----------------------------------------------------------------

    /// Returns `true` if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.access.has_role(role, account)
    }

    /// Returns `true` if `account` may create pairs.
    #[must_use]
    pub fn can_create_pair(&self, account: Address) -> bool {
        self.access.has_role(Role::PairCreator, account)
    }

    /// Returns `true` if `account` may set the fee recipient.
    #[must_use]
    pub fn can_manage_fees(&self, account: Address) -> bool {
        self.access.has_role(Role::FeeManager, account)
            || self.access.has_role(Role::Admin, account)
    }

    /// Returns `true` if `account` may pause and unpause.
    #[must_use]
    pub fn can_pause(&self, account: Address) -> bool {
        self.access.has_role(Role::Pauser, account)
    }

    /// Grants `role` to every account in `accounts`.
    ///
    /// The batch is validated as a whole before anything changes.  One
    /// [`Event::RoleGranted`] is emitted per account that did not already
    /// hold the role.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks [`Role::Admin`]
    ///   (and, for `role == DefaultAdmin`, [`Role::DefaultAdmin`]).
    /// - [`AmmError::EmptyBatch`] if `accounts` is empty.
    /// - [`AmmError::ZeroAddress`] if any account is zero.
    pub fn grant_role_batch(
        &mut self,
        ctx: &mut CallContext,
        role: Role,
        accounts: &[Address],
    ) -> Result<(), AmmError> {
        let sender = ctx.caller();
        self.check_batch(sender, role, accounts)?;
        let events: Vec<Event> = accounts
            .iter()
            .filter(|account| self.access.grant(role, **account))
            .map(|&account| Event::RoleGranted {
                role,
                account,
                sender,
            })
            .collect();
        info!(%role, granted = events.len(), "role granted in batch");
        ctx.emit_all(events);
        Ok(())
    }

    /// Revokes `role` from every account in `accounts`.
    ///
    /// Same authorization and validation as
    /// [`grant_role_batch`](Self::grant_role_batch).
    ///
    /// # Errors
    ///
    /// See [`grant_role_batch`](Self::grant_role_batch).
    pub fn revoke_role_batch(
        &mut self,
        ctx: &mut CallContext,
        role: Role,
        accounts: &[Address],
    ) -> Result<(), AmmError> {
        let sender = ctx.caller();
        self.check_batch(sender, role, accounts)?;
        let events: Vec<Event> = accounts
            .iter()
            .filter(|account| self.access.revoke(role, **account))
            .map(|&account| Event::RoleRevoked {
                role,
                account,
                sender,
            })
            .collect();
        info!(%role, revoked = events.len(), "role revoked in batch");
        ctx.emit_all(events);
        Ok(())
    }

    fn check_batch(
        &self,
        sender: Address,
        role: Role,
        accounts: &[Address],
    ) -> Result<(), AmmError> {
        self.access.check_role(Role::Admin, sender)?;
        if role == Role::DefaultAdmin {
            self.access.check_role(Role::DefaultAdmin, sender)?;
        }
        if accounts.is_empty() {
            return Err(AmmError::EmptyBatch);
        }
        if accounts.iter().any(|account| account.is_zero()) {
            return Err(AmmError::ZeroAddress);
        }
        Ok(())
    }

    /// Grants `role` to a single account.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks
    ///   [`Role::DefaultAdmin`].
    /// - [`AmmError::ZeroAddress`] if `account` is zero.
    pub fn grant_role(
        &mut self,
        ctx: &mut CallContext,
        role: Role,
        account: Address,
    ) -> Result<(), AmmError> {
        let sender = ctx.caller();
        self.access.check_role(Role::DefaultAdmin, sender)?;
        if account.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if self.access.grant(role, account) {
            info!(%role, %account, "role granted");
            ctx.emit(Event::RoleGranted {
                role,
                account,
                sender,
            });
        }
        Ok(())
    }

    /// Revokes `role` from a single account.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] if the caller lacks
    /// [`Role::DefaultAdmin`].
    pub fn revoke_role(
        &mut self,
        ctx: &mut CallContext,
        role: Role,
        account: Address,
    ) -> Result<(), AmmError> {
        let sender = ctx.caller();
        self.access.check_role(Role::DefaultAdmin, sender)?;
        if self.access.revoke(role, account) {
            info!(%role, %account, "role revoked");
            ctx.emit(Event::RoleRevoked {
                role,
                account,
                sender,
            });
        }
        Ok(())
    }

    /// Drops the caller's own membership in `role`.  A no-op if the caller
    /// does not hold it.
    pub fn renounce_role(&mut self, ctx: &mut CallContext, role: Role) {
        let account = ctx.caller();
        if self.access.revoke(role, account) {
            info!(%role, %account, "role renounced");
            ctx.emit(Event::RoleRevoked {
                role,
                account,
                sender: account,
            });
        }
    }

    // -- pause ----------------------------------------------------------------

    /// Returns `true` while pair creation is suspended.
    #[must_use]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// Suspends pair creation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks [`Role::Pauser`].
    /// - [`AmmError::EnforcedPause`] if already paused.
    pub fn pause(&mut self, ctx: &mut CallContext) -> Result<(), AmmError> {
        self.access.check_role(Role::Pauser, ctx.caller())?;
        self.set_paused(ctx)
    }

    /// Resumes pair creation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks [`Role::Pauser`].
    /// - [`AmmError::ExpectedPause`] if not paused.
    pub fn unpause(&mut self, ctx: &mut CallContext) -> Result<(), AmmError> {
        let account = ctx.caller();
        self.access.check_role(Role::Pauser, account)?;
        if !self.paused {
            return Err(AmmError::ExpectedPause);
        }
        self.paused = false;
        info!(%account, "registry unpaused");
        ctx.emit(Event::Unpaused { account });
        Ok(())
    }

    /// Pauses the registry on the root administrator's authority.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller lacks
    ///   [`Role::DefaultAdmin`].
    /// - [`AmmError::EnforcedPause`] if already paused.
    pub fn emergency_stop(&mut self, ctx: &mut CallContext) -> Result<(), AmmError> {
        self.access.check_role(Role::DefaultAdmin, ctx.caller())?;
        self.set_paused(ctx)
    }

    fn set_paused(&mut self, ctx: &mut CallContext) -> Result<(), AmmError> {
        if self.paused {
            return Err(AmmError::EnforcedPause);
        }
        let account = ctx.caller();
        self.paused = true;
        info!(%account, "registry paused");
        ctx.emit(Event::Paused { account });
        Ok(())
    }
}

impl<D> FeeConfig for PairRegistry<D> {
    fn fee_to(&self) -> Option<Address> {
        self.fee_to.fee_to()
    }
}
