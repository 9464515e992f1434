//! calendly-connector - Calendly identity-governance connector
//!
//! Mirrors a Calendly organization, its users, roles and pending invitations
//! into a generic access-graph model (resources, entitlements, grants) and
//! provisions access back through the Calendly API.
//!
//! # Features
//!
//! - Resumable multi-phase grant enumeration with opaque continuation tokens
//! - Strict role validation against the closed {user, admin, owner} vocabulary
//! - Invite members, revoke memberships, cancel pending invitations
//! - Rate-limit annotations surfaced per vendor call
//!
//! # Example
//!
//! ```no_run
//! use calendly_connector::CalendlyConnector;
//!
//! # async fn run() -> calendly_connector::Result<()> {
//! let connector = CalendlyConnector::new(Some("api-token"))?;
//! connector.validate().await?;
//!
//! for syncer in connector.syncers() {
//!     let page = syncer.list(None, "").await?;
//!     println!("{:?}: {} resources", syncer.resource_kind(), page.items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod calendly;
pub mod config;
pub mod connector;
pub mod error;

pub use calendly::{Client, RateLimitDescription, TokenResolver};
pub use connector::{
    CalendlyConnector, ConnectorMetadata, Entitlement, EntitlementKind, Grant, OrgSyncer,
    PageStack, PageState, Resource, ResourceId, ResourceKind, ResourcePage, ResourceSyncer, Role,
    UserStatus, UserSyncer, UserTrait, PENDING_USER_ENTITLEMENT,
};
pub use error::{ConnectorError, Result};
