//! Calendly API client module
//!
//! Thin typed wrapper over the Calendly REST API: paginated listings of
//! memberships and invitations, single-resource fetches, and the invite /
//! remove write calls. Vendor pagination cursors are surfaced opaquely and
//! never interpreted here.

mod client;
mod credentials;
mod invitations;
mod memberships;
mod models;
mod organizations;
mod rate_limit;

pub use client::Client;
pub use credentials::TokenResolver;
pub use models::{
    FilterVars, Invitation, ListResponse, OrgMembership, Organization, Page, PaginationInfo,
    PaginationVars, SingleResponse, User,
};
pub use rate_limit::RateLimitDescription;
