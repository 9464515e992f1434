//! User syncer: phased listing of members and pending invitees

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::calendly::{Client, OrgMembership, PaginationVars};
use crate::config::api;
use crate::error::{ConnectorError, Result};

use async_trait::async_trait;

use super::helpers::split_full_name;
use super::organizations::INVITATIONS_PHASE;
use super::pagination::{PageStack, PageState};
use super::traits::{ResourcePage, ResourceSyncer};
use super::types::{Entitlement, Grant, Resource, ResourceId, ResourceKind, UserStatus, UserTrait};

/// Syncer for user resources under the organization
pub struct UserSyncer {
    client: Arc<Client>,
}

impl UserSyncer {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Active member as a user resource, keyed by the stable user URI
fn user_resource(membership: &OrgMembership, parent: &ResourceId) -> Resource {
    let user = &membership.user;
    let (first_name, last_name) = split_full_name(&user.full_name);

    Resource {
        id: ResourceId::user(user.id.clone()),
        parent: Some(parent.clone()),
        display_name: user.email.clone(),
        user: Some(UserTrait {
            email: user.email.clone(),
            login: Some(user.email.clone()),
            status: UserStatus::Enabled,
            created_at: parse_created_at(&user.created_at),
            profile: serde_json::json!({
                "user_id": user.id,
                "email": user.email,
                "firstName": first_name,
                "lastName": last_name,
                "slug": user.slug,
            }),
        }),
    }
}

/// Pending invitee as a disabled placeholder user, keyed by email because the
/// invited person may not have an account yet
fn invitation_resource(email: &str, parent: &ResourceId) -> Resource {
    Resource {
        id: ResourceId::user(email),
        parent: Some(parent.clone()),
        display_name: email.to_string(),
        user: Some(UserTrait {
            email: email.to_string(),
            login: None,
            status: UserStatus::Disabled,
            created_at: None,
            profile: serde_json::json!({ "email": email }),
        }),
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    /// One step of the phased user listing under the parent organization.
    ///
    /// Walks the same invitations-then-members phase sequence as the grant
    /// traversal, emitting invitation placeholders first.
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page_token: &str,
    ) -> Result<ResourcePage<Resource>> {
        let Some(parent) = parent else {
            // users only exist under an organization
            return Ok(ResourcePage::default());
        };

        let mut stack = PageStack::decode(page_token, ResourceKind::Organization.as_str())?;
        let mut items = Vec::new();
        let mut rate_limits = Vec::new();

        let Some(tag) = stack.current_tag().map(str::to_owned) else {
            return Ok(ResourcePage::default());
        };

        if tag == ResourceKind::Organization.as_str() {
            stack.pop();
            stack.push(PageState::new(ResourceKind::User.as_str()));
            stack.push(PageState::new(INVITATIONS_PHASE));
        } else if tag == INVITATIONS_PHASE {
            let vars = PaginationVars::new(api::RESOURCES_PAGE_SIZE, stack.page_token());
            let page = self
                .client
                .list_invitations(&parent.id, Some(&vars), None)
                .await?;

            rate_limits.extend(page.rate_limit);
            for invitation in &page.items {
                items.push(invitation_resource(&invitation.email, parent));
            }
            stack.advance(&page.next_page_token);
        } else if tag == ResourceKind::User.as_str() {
            let vars = PaginationVars::new(api::RESOURCES_PAGE_SIZE, stack.page_token());
            let page = self
                .client
                .list_org_memberships(&parent.id, Some(&vars), None)
                .await?;

            rate_limits.extend(page.rate_limit);
            for membership in &page.items {
                items.push(user_resource(membership, parent));
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

    /// Users define no entitlements of their own
    async fn entitlements(&self, _resource: &Resource) -> Result<Vec<Entitlement>> {
        Ok(Vec::new())
    }

    /// Users hold grants on the organization, not the other way around
    async fn grants(&self, _resource: &Resource, _page_token: &str) -> Result<ResourcePage<Grant>> {
        Ok(ResourcePage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org_id(server: &MockServer) -> ResourceId {
        ResourceId::organization(format!("{}/organizations/org-1", server.uri()))
    }

    fn syncer(server: &MockServer) -> UserSyncer {
        UserSyncer::new(Arc::new(Client::test_client(&server.uri())))
    }

    fn list_body(items: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "collection": items,
            "pagination": { "next_page_token": next }
        })
    }

    #[tokio::test]
    async fn test_list_without_parent_is_empty() {
        let mock_server = MockServer::start().await;
        let page = syncer(&mock_server).list(None, "").await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_token, "");
    }

    #[tokio::test]
    async fn test_list_emits_invitation_placeholders_first() {
        let mock_server = MockServer::start().await;
        let parent = org_id(&mock_server);

        Mock::given(method("GET"))
            .and(path("/organizations/org-1/invitations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
                vec![serde_json::json!({
                    "uri": format!("{}/invitations/inv-1", parent.id),
                    "email": "pending@example.com",
                    "status": "pending",
                    "created_at": "2024-02-01T00:00:00Z"
                })],
                None,
            )))
            .mount(&mock_server)
            .await;

        let syncer = syncer(&mock_server);
        let fanout = syncer.list(Some(&parent), "").await.unwrap();
        assert!(fanout.items.is_empty());

        let page = syncer
            .list(Some(&parent), &fanout.next_page_token)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        let placeholder = &page.items[0];
        assert_eq!(placeholder.id, ResourceId::user("pending@example.com"));
        let user = placeholder.user.as_ref().unwrap();
        assert_eq!(user.status, UserStatus::Disabled);
        assert!(user.login.is_none());
    }

    #[tokio::test]
    async fn test_list_builds_full_user_resources() {
        let mock_server = MockServer::start().await;
        let parent = org_id(&mock_server);

        Mock::given(method("GET"))
            .and(path("/organizations/org-1/invitations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(vec![], None)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organization_memberships"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
                vec![serde_json::json!({
                    "uri": "https://api.calendly.com/organization_memberships/mem-1",
                    "role": "admin",
                    "organization": parent.id,
                    "user": {
                        "uri": "https://api.calendly.com/users/u-1",
                        "email": "jane@example.com",
                        "name": "Jane Q Doe",
                        "slug": "jane-doe",
                        "created_at": "2024-01-15T10:30:00Z"
                    }
                })],
                None,
            )))
            .mount(&mock_server)
            .await;

        let syncer = syncer(&mock_server);
        let mut token = String::new();
        let mut resources = Vec::new();
        loop {
            let page = syncer.list(Some(&parent), &token).await.unwrap();
            resources.extend(page.items);
            token = page.next_page_token;
            if token.is_empty() {
                break;
            }
        }

        assert_eq!(resources.len(), 1);
        let member = &resources[0];
        assert_eq!(member.id, ResourceId::user("https://api.calendly.com/users/u-1"));
        assert_eq!(member.display_name, "jane@example.com");

        let user = member.user.as_ref().unwrap();
        assert_eq!(user.status, UserStatus::Enabled);
        assert_eq!(user.login.as_deref(), Some("jane@example.com"));
        assert!(user.created_at.is_some());
        assert_eq!(user.profile["firstName"], "Jane");
        assert_eq!(user.profile["lastName"], "Q Doe");
        assert_eq!(user.profile["slug"], "jane-doe");
    }

    #[tokio::test]
    async fn test_users_have_no_entitlements_or_grants() {
        let mock_server = MockServer::start().await;
        let parent = org_id(&mock_server);
        let resource = invitation_resource("x@example.com", &parent);

        let syncer = syncer(&mock_server);
        assert!(syncer.entitlements(&resource).await.unwrap().is_empty());
        assert!(syncer.grants(&resource, "").await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_provisioning_defaults_are_rejected() {
        let mock_server = MockServer::start().await;
        let parent = org_id(&mock_server);
        let principal = invitation_resource("x@example.com", &parent);
        let entitlement = Entitlement::pending_invitation(&parent);

        let syncer = syncer(&mock_server);
        let err = syncer.grant(&principal, &entitlement).await.unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidArgument(_)));
    }
}
