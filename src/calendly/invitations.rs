//! Organization invitation API operations

use log::debug;

use crate::config::api;
use crate::error::Result;

use super::client::{append_pagination, append_query, Client};
use super::models::{FilterVars, Invitation, InviteBody, ListResponse, Page, PaginationVars};
use super::rate_limit::RateLimitDescription;

impl Client {
    /// List pending invitations of an organization.
    ///
    /// The status filter is always `pending`; `filter` optionally narrows the
    /// listing to an exact invitee email match.
    pub async fn list_invitations(
        &self,
        org_uri: &str,
        pagination: Option<&PaginationVars>,
        filter: Option<&FilterVars>,
    ) -> Result<Page<Invitation>> {
        let mut url = format!(
            "{}{}?status=pending",
            org_uri.trim_end_matches('/'),
            api::INVITATIONS_SEGMENT
        );
        append_pagination(&mut url, pagination);
        if let Some(filter) = filter {
            append_query(&mut url, "email", &filter.email);
        }

        debug!("Listing invitations from: {}", url);

        let context = format!("failed to list invitations for organization '{}'", org_uri);
        let (res, rate_limit): (ListResponse<Invitation>, _) =
            self.send_json(self.get(&url), &context).await?;

        Ok(Page {
            next_page_token: res.next_page_token(),
            items: res.collection,
            rate_limit,
        })
    }

    /// Invite a user to the organization by email
    pub async fn invite_member(
        &self,
        org_uri: &str,
        email: &str,
    ) -> Result<Option<RateLimitDescription>> {
        let url = format!(
            "{}{}",
            org_uri.trim_end_matches('/'),
            api::INVITATIONS_SEGMENT
        );

        debug!("Inviting '{}' via: {}", email, url);

        let body = InviteBody {
            email: email.to_string(),
        };
        let context = format!("failed to invite '{}'", email);
        self.send_no_content(self.post(&url).json(&body), &context)
            .await
    }

    /// Cancel a pending invitation by its identifier
    pub async fn remove_invitation(
        &self,
        org_uri: &str,
        invitation_id: &str,
    ) -> Result<Option<RateLimitDescription>> {
        let url = format!(
            "{}{}/{}",
            org_uri.trim_end_matches('/'),
            api::INVITATIONS_SEGMENT,
            invitation_id
        );

        debug!("Removing invitation: {}", url);

        let context = format!("failed to remove invitation '{}'", invitation_id);
        self.send_no_content(self.delete(&url), &context).await
    }
}
