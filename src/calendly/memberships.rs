//! Organization membership API operations

use log::debug;

use crate::config::api;
use crate::error::Result;

use super::client::{append_pagination, append_query, Client};
use super::models::{FilterVars, ListResponse, OrgMembership, Page, PaginationVars};
use super::rate_limit::RateLimitDescription;

impl Client {
    /// List memberships of an organization.
    ///
    /// `filter` narrows the listing to an exact email match, which is how a
    /// principal is resolved to its membership identifier before deletion.
    pub async fn list_org_memberships(
        &self,
        org_uri: &str,
        pagination: Option<&PaginationVars>,
        filter: Option<&FilterVars>,
    ) -> Result<Page<OrgMembership>> {
        let mut url = format!(
            "{}{}?organization={}",
            self.base_url(),
            api::ORG_MEMBERSHIPS_PATH,
            urlencoding::encode(org_uri)
        );
        append_pagination(&mut url, pagination);
        if let Some(filter) = filter {
            append_query(&mut url, "email", &filter.email);
        }

        debug!("Listing organization memberships from: {}", url);

        let context = format!("failed to list memberships for organization '{}'", org_uri);
        let (res, rate_limit): (ListResponse<OrgMembership>, _) =
            self.send_json(self.get(&url), &context).await?;

        Ok(Page {
            next_page_token: res.next_page_token(),
            items: res.collection,
            rate_limit,
        })
    }

    /// Remove a member from the organization by membership identifier.
    ///
    /// Takes the membership id (the tail of the membership URI), not the user id.
    pub async fn remove_org_member(
        &self,
        membership_id: &str,
    ) -> Result<Option<RateLimitDescription>> {
        let url = format!(
            "{}{}/{}",
            self.base_url(),
            api::ORG_MEMBERSHIPS_PATH,
            membership_id
        );

        debug!("Removing organization membership: {}", url);

        let context = format!("failed to remove membership '{}'", membership_id);
        self.send_no_content(self.delete(&url), &context).await
    }
}
