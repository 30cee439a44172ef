//! Access control module
//!
//! Decides whether a user is granted access by a set of access policies.
//!
//! ## Access Control Model
//!
//! An access policy is a pair of maps, one keyed by user id and one keyed by
//! team id. A user is granted access when either:
//!
//! 1. the user map has an entry for the user, or
//! 2. the team map has an entry for any team the user belongs to.
//!
//! The role stored in an entry is not inspected here. The same shape is used
//! for registry access on an environment and for namespace access on a
//! Kubernetes cluster; the `default` namespace is open to every user.

pub mod evaluator;
pub mod namespace;
pub mod types;

pub use evaluator::{authorized_access, authorized_for};
pub use namespace::{DEFAULT_NAMESPACE, NamespaceAuthorizer};
pub use types::{
    AccessPolicy, EndpointId, MembershipRole, NamespaceAccessPolicies, NamespaceAccessPolicy,
    PolicyMaps, Privilege, RegistryId, RoleId, TeamAccessPolicies, TeamId, TeamMembership,
    User, UserAccessPolicies, UserId, UserRole,
};
