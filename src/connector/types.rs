//! Access-graph domain types exposed to the host governance platform

use chrono::{DateTime, Utc};

use crate::error::{ConnectorError, Result};

/// Entitlement slug for a pending invitation to the organization
pub const PENDING_USER_ENTITLEMENT: &str = "pending_user";

/// Closed set of resource kinds participating in the sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Organization,
    User,
}

impl ResourceKind {
    /// Stable tag used in resource ids and continuation-token phase markers
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Organization => "org",
            ResourceKind::User => "user",
        }
    }
}

/// Identifier of a resource: its kind plus the vendor identifier.
///
/// For organizations and active users the id is the full vendor URI; for
/// pending invitees, who may have no account yet, it is the invitee email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceId {
    pub fn organization(id: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Organization,
            id: id.into(),
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::User,
            id: id.into(),
        }
    }
}

/// Account status carried by user resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Enabled,
    /// Pending invitees are emitted as disabled placeholder users
    Disabled,
}

/// User-shaped attributes of a resource
#[derive(Debug, Clone, PartialEq)]
pub struct UserTrait {
    pub email: String,
    pub login: Option<String>,
    pub status: UserStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub profile: serde_json::Value,
}

/// A domain entity exposed to the host platform
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub display_name: String,
    /// Present on user resources only
    pub user: Option<UserTrait>,
}

/// Organization role, a fixed closed vocabulary.
///
/// A membership reporting any other role is a data-integrity error, not a
/// silently ignored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    Owner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    /// Parse a vendor role string, failing with `InvalidRoleData` outside the vocabulary
    pub fn parse(role: &str) -> Result<Role> {
        match role {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(ConnectorError::InvalidRoleData {
                role: other.to_string(),
            }),
        }
    }
}

/// Whether an entitlement is a membership-style assignment or a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementKind {
    Assignment,
    Permission,
}

/// A grantable capability scoped to a resource
#[derive(Debug, Clone, PartialEq)]
pub struct Entitlement {
    pub resource: ResourceId,
    pub slug: String,
    pub kind: EntitlementKind,
    pub display_name: String,
    pub description: String,
    pub grantable_to: ResourceKind,
}

impl Entitlement {
    /// Entitlement representing a pending invitation to the organization
    pub fn pending_invitation(org: &ResourceId) -> Self {
        Self {
            resource: org.clone(),
            slug: PENDING_USER_ENTITLEMENT.to_string(),
            kind: EntitlementKind::Assignment,
            display_name: "pending invitation".to_string(),
            description: "pending invitation to the organization".to_string(),
            grantable_to: ResourceKind::User,
        }
    }

    /// Entitlement representing a role in the organization
    pub fn role(org: &ResourceId, role: Role) -> Self {
        Self {
            resource: org.clone(),
            slug: role.as_str().to_string(),
            kind: EntitlementKind::Permission,
            display_name: format!("{} role", role.as_str()),
            description: format!("{} role in the organization", role.as_str()),
            grantable_to: ResourceKind::User,
        }
    }
}

/// An assertion that a principal holds an entitlement on a resource
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    pub entitlement: Entitlement,
    pub principal: Resource,
}

impl Grant {
    pub fn new(entitlement: Entitlement, principal: Resource) -> Self {
        Self {
            entitlement,
            principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_vocabulary() {
        assert_eq!(Role::parse("user").unwrap(), Role::User);
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("owner").unwrap(), Role::Owner);
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        let err = Role::parse("superadmin").unwrap_err();
        match err {
            ConnectorError::InvalidRoleData { role } => assert_eq!(role, "superadmin"),
            other => panic!("Expected InvalidRoleData, got {:?}", other),
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_pending_invitation_entitlement() {
        let org = ResourceId::organization("https://api.calendly.com/organizations/org-1");
        let ent = Entitlement::pending_invitation(&org);
        assert_eq!(ent.slug, PENDING_USER_ENTITLEMENT);
        assert_eq!(ent.kind, EntitlementKind::Assignment);
        assert_eq!(ent.grantable_to, ResourceKind::User);
        assert_eq!(ent.resource, org);
    }

    #[test]
    fn test_role_entitlement() {
        let org = ResourceId::organization("https://api.calendly.com/organizations/org-1");
        let ent = Entitlement::role(&org, Role::Admin);
        assert_eq!(ent.slug, "admin");
        assert_eq!(ent.kind, EntitlementKind::Permission);
        assert_eq!(ent.display_name, "admin role");
    }

    #[test]
    fn test_resource_kind_tags() {
        assert_eq!(ResourceKind::Organization.as_str(), "org");
        assert_eq!(ResourceKind::User.as_str(), "user");
    }
}
