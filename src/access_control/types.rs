//! Access control types
//!
//! Identifiers, users, team memberships and the policy maps that grant access.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// User identifier
    UserId
);
id_type!(
    /// Team identifier
    TeamId
);
id_type!(
    /// Environment (endpoint) identifier
    EndpointId
);
id_type!(
    /// Registry identifier
    RegistryId
);
id_type!(
    /// Access policy role identifier
    RoleId
);

/// Global role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserRole {
    Administrator,
    Standard,
}

impl TryFrom<u8> for UserRole {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UserRole::Administrator),
            2 => Ok(UserRole::Standard),
            other => Err(format!("unknown user role {}", other)),
        }
    }
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> u8 {
        match role {
            UserRole::Administrator => 1,
            UserRole::Standard => 2,
        }
    }
}

/// A user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
}

impl User {
    pub fn is_administrator(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

/// Role of a user inside a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MembershipRole {
    Leader,
    Member,
}

impl TryFrom<u8> for MembershipRole {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MembershipRole::Leader),
            2 => Ok(MembershipRole::Member),
            other => Err(format!("unknown team membership role {}", other)),
        }
    }
}

impl From<MembershipRole> for u8 {
    fn from(role: MembershipRole) -> u8 {
        match role {
            MembershipRole::Leader => 1,
            MembershipRole::Member => 2,
        }
    }
}

/// Membership of a user in a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    #[serde(rename = "TeamID")]
    pub team_id: TeamId,
    #[serde(rename = "Role")]
    pub role: MembershipRole,
}

/// A single access policy entry. Only its presence matters for visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(rename = "RoleId", default)]
    pub role_id: RoleId,
}

/// Per-user access policies
pub type UserAccessPolicies = HashMap<UserId, AccessPolicy>;

/// Per-team access policies
pub type TeamAccessPolicies = HashMap<TeamId, AccessPolicy>;

/// Anything carrying a user map and a team map of access policies
pub trait PolicyMaps {
    fn user_policies(&self) -> &UserAccessPolicies;

    fn team_policies(&self) -> &TeamAccessPolicies;
}

/// Access policies for one namespace on one environment, as stored by the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamespaceAccessPolicy {
    #[serde(default)]
    pub user_access_policies: UserAccessPolicies,
    #[serde(default)]
    pub team_access_policies: TeamAccessPolicies,
}

impl PolicyMaps for NamespaceAccessPolicy {
    fn user_policies(&self) -> &UserAccessPolicies {
        &self.user_access_policies
    }

    fn team_policies(&self) -> &TeamAccessPolicies {
        &self.team_access_policies
    }
}

/// Namespace name → access policies
pub type NamespaceAccessPolicies = HashMap<String, NamespaceAccessPolicy>;

/// Privilege level of the caller for one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    /// Global or environment administrator
    Administrator,
    /// Any other authenticated user
    StandardUser,
}

impl Privilege {
    pub const fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Privilege::Administrator
        } else {
            Privilege::StandardUser
        }
    }

    pub const fn is_administrator(&self) -> bool {
        matches!(self, Privilege::Administrator)
    }

    /// Whether per-environment access policies must be stripped from output
    pub const fn hides_access_policies(&self) -> bool {
        !self.is_administrator()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Privilege::Administrator => "administrator",
            Privilege::StandardUser => "standard_user",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
