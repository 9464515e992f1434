//! Organization syncer: phased grant enumeration and invite/revoke provisioning

use log::warn;
use std::sync::Arc;

use crate::calendly::{Client, FilterVars, OrgMembership, Organization, PaginationVars, RateLimitDescription};
use crate::config::api;
use crate::error::{ConnectorError, Result};

use async_trait::async_trait;

use super::helpers::uri_tail;
use super::pagination::{PageStack, PageState};
use super::traits::{ResourcePage, ResourceSyncer};
use super::types::{
    Entitlement, Grant, Resource, ResourceId, ResourceKind, Role, PENDING_USER_ENTITLEMENT,
};

/// Phase tag for the pending-invitations sweep; not a resource kind of its own
pub const INVITATIONS_PHASE: &str = "invitations";

/// Syncer for the single organization the token belongs to
pub struct OrgSyncer {
    client: Arc<Client>,
}

impl OrgSyncer {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

/// Build the organization resource; the display name is the URI tail, the
/// resource id keeps the full vendor URI needed by the listing endpoints
fn org_resource(org: &Organization) -> Resource {
    Resource {
        id: ResourceId::organization(org.id.clone()),
        parent: None,
        display_name: uri_tail(&org.id).to_string(),
        user: None,
    }
}

/// Principal for an invitation grant; pending invitees may have no account,
/// so the identity is keyed by email
fn invited_user_principal(email: &str, org: &ResourceId) -> Resource {
    Resource {
        id: ResourceId::user(email),
        parent: Some(org.clone()),
        display_name: email.to_string(),
        user: None,
    }
}

/// Principal for a membership grant, keyed by the member's stable user URI
fn member_principal(membership: &OrgMembership, org: &ResourceId) -> Resource {
    Resource {
        id: ResourceId::user(membership.user.id.clone()),
        parent: Some(org.clone()),
        display_name: membership.user.email.clone(),
        user: None,
    }
}

#[async_trait]
impl ResourceSyncer for OrgSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Organization
    }

    /// Returns the top-level resource: the organization of the current user.
    /// Fetched fresh on every call, never cached.
    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        _page_token: &str,
    ) -> Result<ResourcePage<Resource>> {
        let mut rate_limits = Vec::new();

        let (user, rl_user) = self.client.get_current_user().await?;
        rate_limits.extend(rl_user);

        let (org, rl_org) = self.client.get_org_details(&user.organization).await?;
        rate_limits.extend(rl_org);

        Ok(ResourcePage {
            items: vec![org_resource(&org)],
            next_page_token: String::new(),
            rate_limits,
        })
    }

    /// The entitlement set is always exactly {pending invitation} plus one
    /// permission entitlement per role, regardless of how many users exist.
    async fn entitlements(&self, resource: &Resource) -> Result<Vec<Entitlement>> {
        let mut rv = vec![Entitlement::pending_invitation(&resource.id)];
        for role in Role::ALL {
            rv.push(Entitlement::role(&resource.id, role));
        }
        Ok(rv)
    }

    /// One step of the phased grant traversal.
    ///
    /// The continuation stack starts as the parent marker, fans out to the
    /// invitations phase followed by the users phase, and drains each phase
    /// page by page. The stack is only advanced after a page succeeds, so a
    /// failed or cancelled call re-fetches the same page on retry.
    async fn grants(&self, resource: &Resource, page_token: &str) -> Result<ResourcePage<Grant>> {
        let mut stack = PageStack::decode(page_token, ResourceKind::Organization.as_str())?;
        let mut items = Vec::new();
        let mut rate_limits = Vec::new();

        let Some(tag) = stack.current_tag().map(str::to_owned) else {
            // all phases exhausted
            return Ok(ResourcePage::default());
        };

        if tag == ResourceKind::Organization.as_str() {
            // phase fan-out: no vendor call here; the next invocation starts
            // on the invitations phase left at the top of the stack
            stack.pop();
            stack.push(PageState::new(ResourceKind::User.as_str()));
            stack.push(PageState::new(INVITATIONS_PHASE));
        } else if tag == INVITATIONS_PHASE {
            let vars = PaginationVars::new(api::RESOURCES_PAGE_SIZE, stack.page_token());
            let page = self
                .client
                .list_invitations(&resource.id.id, Some(&vars), None)
                .await?;

            rate_limits.extend(page.rate_limit);
            for invitation in &page.items {
                items.push(Grant::new(
                    Entitlement::pending_invitation(&resource.id),
                    invited_user_principal(&invitation.email, &resource.id),
                ));
            }
            stack.advance(&page.next_page_token);
        } else if tag == ResourceKind::User.as_str() {
            let vars = PaginationVars::new(api::RESOURCES_PAGE_SIZE, stack.page_token());
            let page = self
                .client
                .list_org_memberships(&resource.id.id, Some(&vars), None)
                .await?;

            rate_limits.extend(page.rate_limit);
            for membership in &page.items {
                let role = Role::parse(&membership.role)?;
                items.push(Grant::new(
                    Entitlement::role(&resource.id, role),
                    member_principal(membership, &resource.id),
                ));
            }
            stack.advance(&page.next_page_token);
        } else {
            return Err(ConnectorError::MalformedContinuation(format!(
                "unknown phase '{}'",
                tag
            )));
        }

        Ok(ResourcePage {
            items,
            next_page_token: stack.encode()?,
            rate_limits,
        })
    }

    /// Granting is only used to invite users; roles cannot be granted directly.
    async fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Vec<RateLimitDescription>> {
        if principal.id.kind != ResourceKind::User {
            warn!(
                "only users can be granted organization membership (principal: {})",
                principal.id.id
            );
            return Err(ConnectorError::InvalidArgument(
                "only users can be granted organization membership".to_string(),
            ));
        }

        if entitlement.slug != PENDING_USER_ENTITLEMENT {
            warn!(
                "roles cannot be granted directly (entitlement: {})",
                entitlement.slug
            );
            return Err(ConnectorError::InvalidArgument(
                "roles cannot be granted directly; only invitations are supported".to_string(),
            ));
        }

        let org = principal.parent.as_ref().ok_or_else(|| {
            ConnectorError::InvalidArgument(
                "principal has no parent organization".to_string(),
            )
        })?;

        let rate_limit = self.client.invite_member(&org.id, &principal.id.id).await?;
        Ok(rate_limit.into_iter().collect())
    }

    /// Revoking removes an active membership or cancels a pending invitation.
    /// Role tiers above the base membership cannot be individually revoked.
    async fn revoke(&self, grant: &Grant) -> Result<Vec<RateLimitDescription>> {
        let principal = &grant.principal;
        let entitlement = &grant.entitlement;

        if principal.id.kind != ResourceKind::User {
            warn!(
                "only users can be revoked from the organization (principal: {})",
                principal.id.id
            );
            return Err(ConnectorError::InvalidArgument(
                "only users can be revoked from the organization".to_string(),
            ));
        }

        let slug = entitlement.slug.as_str();
        if slug != Role::User.as_str() && slug != PENDING_USER_ENTITLEMENT {
            warn!("entitlement '{}' cannot be individually revoked", slug);
            return Err(ConnectorError::InvalidArgument(
                "only user memberships and pending invitations can be revoked".to_string(),
            ));
        }

        let org = principal.parent.as_ref().ok_or_else(|| {
            ConnectorError::InvalidArgument(
                "principal has no parent organization".to_string(),
            )
        })?;

        let mut rate_limits = Vec::new();
        let filter = FilterVars::new(&principal.display_name);

        if slug == Role::User.as_str() {
            let page = self
                .client
                .list_org_memberships(&org.id, None, Some(&filter))
                .await?;
            rate_limits.extend(page.rate_limit);

            if page.items.is_empty() {
                return Err(ConnectorError::NotFound(
                    "user not found in organization".to_string(),
                ));
            }
            if page.items.len() > 1 {
                // ambiguous identity, never guessed
                return Err(ConnectorError::Internal(
                    "multiple memberships match the principal in the organization".to_string(),
                ));
            }

            // delete by the membership's own identifier, not the user's
            let membership_id = uri_tail(&page.items[0].id);
            rate_limits.extend(self.client.remove_org_member(membership_id).await?);
        } else {
            let page = self
                .client
                .list_invitations(&org.id, None, Some(&filter))
                .await?;
            rate_limits.extend(page.rate_limit);

            if page.items.is_empty() {
                return Err(ConnectorError::NotFound(
                    "user invitation not found in organization".to_string(),
                ));
            }

            // do not fail on duplicates, just take the first one
            let invitation_id = uri_tail(&page.items[0].id);
            rate_limits.extend(self.client.remove_invitation(&org.id, invitation_id).await?);
        }

        Ok(rate_limits)
    }
}
