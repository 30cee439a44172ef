//! Request security context
//!
//! Who is calling, whether they hold the global administrator role, and
//! which teams they belong to. Built upstream of the handlers and carried in request
//! extensions.

use crate::access_control::types::{Privilege, TeamMembership, UserId};
use crate::error::StoreResult;
use crate::store::UserStore;

/// Security context of an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    pub user_id: UserId,
    /// Global administrator role only; environment-level roles are not modeled
    pub is_admin: bool,
    pub memberships: Vec<TeamMembership>,
}

impl SecurityContext {
    pub fn new(user_id: UserId, is_admin: bool, memberships: Vec<TeamMembership>) -> Self {
        Self {
            user_id,
            is_admin,
            memberships,
        }
    }

    /// Build the context of a user from the user store
    pub async fn load(users: &dyn UserStore, user_id: UserId) -> StoreResult<Self> {
        let user = users.user(user_id).await?;
        let memberships = users.team_memberships(user_id).await?;

        Ok(Self::new(user.id, user.is_administrator(), memberships))
    }

    pub fn privilege(&self) -> Privilege {
        Privilege::from_admin_flag(self.is_admin)
    }
}
