//! Current-user and organization API operations

use log::debug;

use crate::config::api;
use crate::error::Result;

use super::client::Client;
use super::models::{Organization, SingleResponse, User};
use super::rate_limit::RateLimitDescription;

impl Client {
    /// Get details of the user the token belongs to
    pub async fn get_current_user(&self) -> Result<(User, Option<RateLimitDescription>)> {
        let url = format!("{}{}", self.base_url(), api::CURRENT_USER_PATH);
        debug!("Fetching current user from: {}", url);

        let (res, rate_limit): (SingleResponse<User>, _) = self
            .send_json(self.get(&url), "failed to fetch current user")
            .await?;

        Ok((res.resource, rate_limit))
    }

    /// Get organization details by its full vendor URI
    pub async fn get_org_details(
        &self,
        org_uri: &str,
    ) -> Result<(Organization, Option<RateLimitDescription>)> {
        debug!("Fetching organization details from: {}", org_uri);

        let context = format!("failed to fetch organization '{}'", org_uri);
        let (res, rate_limit): (SingleResponse<Organization>, _) =
            self.send_json(self.get(org_uri), &context).await?;

        Ok((res.resource, rate_limit))
    }
}
