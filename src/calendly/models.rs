//! Calendly API data models

use serde::{Deserialize, Serialize};

use super::rate_limit::RateLimitDescription;

/// Calendly user
#[derive(Deserialize, Debug, Clone)]
pub struct User {
    /// Stable user URI
    #[serde(rename = "uri")]
    pub id: String,
    pub email: String,
    #[serde(rename = "name")]
    pub full_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub created_at: String,
    /// URI of the organization the user currently belongs to
    #[serde(default, rename = "current_organization")]
    pub organization: String,
}

/// Calendly organization
#[derive(Deserialize, Debug, Clone)]
pub struct Organization {
    #[serde(rename = "uri")]
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub stage: String,
}

/// Membership binding a user to the organization with exactly one role.
///
/// The membership URI is distinct from the embedded user's URI; removing a
/// member requires the membership identifier, not the user identifier.
#[derive(Deserialize, Debug, Clone)]
pub struct OrgMembership {
    #[serde(rename = "uri")]
    pub id: String,
    pub role: String,
    #[serde(default, rename = "organization")]
    pub org: String,
    pub user: User,
}

/// Pending invitation to the organization
#[derive(Deserialize, Debug, Clone)]
pub struct Invitation {
    #[serde(rename = "uri")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    /// Set once the invitee has an account; pending invitees may have none
    #[serde(default, rename = "user")]
    pub user_id: Option<String>,
}

/// Pagination block of a list response
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PaginationInfo {
    /// Opaque cursor for the next page; absent or empty on the last page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response wrapper for Calendly list endpoints
#[derive(Deserialize, Debug)]
pub struct ListResponse<T> {
    pub collection: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ListResponse<T> {
    /// Next-page cursor, empty when this was the last page
    pub fn next_page_token(&self) -> String {
        self.pagination
            .as_ref()
            .and_then(|p| p.next_page_token.clone())
            .unwrap_or_default()
    }
}

/// Response wrapper for Calendly single-resource endpoints
#[derive(Deserialize, Debug)]
pub struct SingleResponse<T> {
    pub resource: T,
}

/// Error body returned for any status >= 300
#[derive(Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

/// Request payload for inviting a member
#[derive(Serialize, Debug)]
pub struct InviteBody {
    pub email: String,
}

/// Pagination request parameters.
///
/// `count` is omitted from the query when zero; `next` is omitted when empty.
#[derive(Debug, Clone)]
pub struct PaginationVars {
    pub count: u32,
    pub next: String,
}

impl PaginationVars {
    pub fn new(count: u32, next: &str) -> Self {
        Self {
            count,
            next: next.to_string(),
        }
    }
}

/// Exact-match email filter for membership and invitation listings
#[derive(Debug, Clone)]
pub struct FilterVars {
    pub email: String,
}

impl FilterVars {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
        }
    }
}

/// One page of vendor results with the cursor and rate-limit data for the call
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: String,
    pub rate_limit: Option<RateLimitDescription>,
}
