//! Access policy evaluation
//!
//! A user is granted access when the user map holds an entry for them, or the
//! team map holds an entry for any team they belong to. Role values are not
//! inspected.

use crate::access_control::types::{
    PolicyMaps, TeamAccessPolicies, TeamMembership, UserAccessPolicies, UserId,
};
use tracing::trace;

/// Check whether a user is granted access by a pair of policy maps
pub fn authorized_access(
    user_id: UserId,
    memberships: &[TeamMembership],
    user_policies: &UserAccessPolicies,
    team_policies: &TeamAccessPolicies,
) -> bool {
    if user_policies.contains_key(&user_id) {
        trace!(user = %user_id, "Matched user access policy");
        return true;
    }

    if let Some(membership) = memberships
        .iter()
        .find(|m| team_policies.contains_key(&m.team_id))
    {
        trace!(user = %user_id, team = %membership.team_id, "Matched team access policy");
        return true;
    }

    false
}

/// Check access against anything exposing user and team policy maps
pub fn authorized_for(
    user_id: UserId,
    memberships: &[TeamMembership],
    policy: &impl PolicyMaps,
) -> bool {
    authorized_access(
        user_id,
        memberships,
        policy.user_policies(),
        policy.team_policies(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_control::types::{
        AccessPolicy, MembershipRole, NamespaceAccessPolicy, RoleId, TeamId,
    };

    fn membership(user: u32, team: u32) -> TeamMembership {
        TeamMembership {
            id: team,
            user_id: UserId(user),
            team_id: TeamId(team),
            role: MembershipRole::Member,
        }
    }

    #[test]
    fn test_empty_policies_deny() {
        assert!(!authorized_access(
            UserId(1),
            &[membership(1, 10)],
            &UserAccessPolicies::new(),
            &TeamAccessPolicies::new(),
        ));
    }

    #[test]
    fn test_user_entry_grants() {
        let mut users = UserAccessPolicies::new();
        users.insert(UserId(1), AccessPolicy::default());

        assert!(authorized_access(
            UserId(1),
            &[],
            &users,
            &TeamAccessPolicies::new()
        ));
        assert!(!authorized_access(
            UserId(2),
            &[],
            &users,
            &TeamAccessPolicies::new()
        ));
    }

    #[test]
    fn test_team_entry_grants() {
        let mut teams = TeamAccessPolicies::new();
        teams.insert(TeamId(20), AccessPolicy::default());

        let memberships = vec![membership(3, 10), membership(3, 20)];
        assert!(authorized_access(
            UserId(3),
            &memberships,
            &UserAccessPolicies::new(),
            &teams
        ));
        assert!(!authorized_access(
            UserId(3),
            &memberships[..1],
            &UserAccessPolicies::new(),
            &teams
        ));
    }

    #[test]
    fn test_role_value_is_ignored() {
        let mut users = UserAccessPolicies::new();
        users.insert(UserId(5), AccessPolicy { role_id: RoleId(42) });
        let policy = NamespaceAccessPolicy {
            user_access_policies: users,
            ..Default::default()
        };

        assert!(authorized_for(UserId(5), &[], &policy));
    }
}
