//! Host-platform contract for resource syncers

use async_trait::async_trait;

use crate::calendly::RateLimitDescription;
use crate::error::{ConnectorError, Result};

use super::types::{Entitlement, Grant, Resource, ResourceId, ResourceKind};

/// One page of results plus the re-encoded continuation token and the
/// rate-limit annotations collected during the call (concatenated, never
/// merged or deduplicated).
#[derive(Debug)]
pub struct ResourcePage<T> {
    pub items: Vec<T>,
    /// Empty when enumeration is complete
    pub next_page_token: String,
    pub rate_limits: Vec<RateLimitDescription>,
}

impl<T> Default for ResourcePage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: String::new(),
            rate_limits: Vec::new(),
        }
    }
}

/// A syncer for one resource kind: enumeration plus optional provisioning.
///
/// Each call is a single logical step; callers round-trip the continuation
/// token between successive `list`/`grants` invocations. Implementations hold
/// only an immutable client handle and are safe for concurrent use.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// The resource kind this syncer enumerates
    fn resource_kind(&self) -> ResourceKind;

    /// List one page of resources under `parent`
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        page_token: &str,
    ) -> Result<ResourcePage<Resource>>;

    /// Entitlements defined on a resource; not paginated
    async fn entitlements(&self, resource: &Resource) -> Result<Vec<Entitlement>>;

    /// List one page of grants on a resource
    async fn grants(&self, resource: &Resource, page_token: &str) -> Result<ResourcePage<Grant>>;

    /// Provision an entitlement to a principal
    async fn grant(
        &self,
        _principal: &Resource,
        _entitlement: &Entitlement,
    ) -> Result<Vec<RateLimitDescription>> {
        Err(ConnectorError::InvalidArgument(format!(
            "granting is not supported for {} resources",
            self.resource_kind().as_str()
        )))
    }

    /// Revoke a previously observed grant
    async fn revoke(&self, _grant: &Grant) -> Result<Vec<RateLimitDescription>> {
        Err(ConnectorError::InvalidArgument(format!(
            "revoking is not supported for {} resources",
            self.resource_kind().as_str()
        )))
    }
}
