//! Access-control roles recognised by the pair registry.

use core::fmt;

use alloy_primitives::{B256, keccak256};

/// A registry permission.
///
/// Each role has a 32-byte identifier: [`Role::DefaultAdmin`] is the
/// all-zero word, every other role is `keccak256` of its name, so the
/// identifiers line up with those used by on-chain access-control
/// contracts and off-chain tooling.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{B256, keccak256};
/// use pairswap::domain::Role;
///
/// assert_eq!(Role::DefaultAdmin.id(), B256::ZERO);
/// assert_eq!(Role::Pauser.id(), keccak256("PAUSER_ROLE"));
/// assert_eq!(Role::from_id(Role::Admin.id()), Some(Role::Admin));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Root administrator; gates emergency stop and single-role grants.
    DefaultAdmin,
    /// Registry administrator; gates batch role changes and the fee setter.
    Admin,
    /// May create pairs.
    PairCreator,
    /// May set the protocol-fee recipient.
    FeeManager,
    /// May pause and unpause pair creation.
    Pauser,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::DefaultAdmin,
        Self::Admin,
        Self::PairCreator,
        Self::FeeManager,
        Self::Pauser,
    ];

    /// Returns the canonical role name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Self::Admin => "ADMIN_ROLE",
            Self::PairCreator => "PAIR_CREATOR_ROLE",
            Self::FeeManager => "FEE_MANAGER_ROLE",
            Self::Pauser => "PAUSER_ROLE",
        }
    }

    /// Returns the 32-byte role identifier.
    #[must_use]
    pub fn id(&self) -> B256 {
        match self {
            Self::DefaultAdmin => B256::ZERO,
            other => keccak256(other.name()),
        }
    }

    /// Resolves a 32-byte identifier back to a role.
    #[must_use]
    pub fn from_id(id: B256) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
