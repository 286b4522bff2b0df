//! Role membership table.

use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;

use crate::domain::Role;
use crate::error::AmmError;

/// Maps each [`Role`] to the set of accounts holding it.
///
/// Pure bookkeeping: who may change membership is decided by the
/// registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessControl {
    members: HashMap<Role, HashSet<Address>>,
}

impl AccessControl {
    /// Creates a table in which `admin` holds every role.
    #[must_use]
    pub fn with_admin(admin: Address) -> Self {
        let members = Role::ALL
            .into_iter()
            .map(|role| (role, HashSet::from([admin])))
            .collect();
        Self { members }
    }

    /// Returns `true` if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|members| members.contains(&account))
    }

    /// Fails with [`AmmError::Unauthorized`] unless `account` holds `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] naming the missing role.
    pub fn check_role(&self, role: Role, account: Address) -> Result<(), AmmError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(AmmError::Unauthorized { role, account })
        }
    }

    /// Adds `account` to `role`.  Returns `false` if it was already a
    /// member.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Removes `account` from `role`.  Returns `false` if it was not a
    /// member.
    pub fn revoke(&mut self, role: Role, account: Address) -> bool {
        self.members
            .get_mut(&role)
            .is_some_and(|members| members.remove(&account))
    }

    /// Number of accounts holding `role`.
    #[must_use]
    pub fn member_count(&self, role: Role) -> usize {
        self.members.get(&role).map_or(0, HashSet::len)
    }
}
