//! Access-graph connector module
//!
//! Maps the Calendly organization, its members, roles and pending invitations
//! onto the resource/entitlement/grant model consumed by the host governance
//! platform, and provisions access back through the vendor API.

pub mod helpers;
pub mod organizations;
pub mod pagination;
pub mod traits;
pub mod types;
pub mod users;

use std::sync::Arc;

use crate::calendly::{Client, TokenResolver};
use crate::error::{ConnectorError, Result};

pub use organizations::{OrgSyncer, INVITATIONS_PHASE};
pub use pagination::{PageStack, PageState};
pub use traits::{ResourcePage, ResourceSyncer};
pub use types::{
    Entitlement, EntitlementKind, Grant, Resource, ResourceId, ResourceKind, Role, UserStatus,
    UserTrait, PENDING_USER_ENTITLEMENT,
};
pub use users::UserSyncer;

/// Metadata describing the connector to the host platform
#[derive(Debug, Clone)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

/// The Calendly connector: one organization, its users, roles and invitations
pub struct CalendlyConnector {
    client: Arc<Client>,
}

impl CalendlyConnector {
    /// Create a connector, resolving the API token from the explicit value or
    /// the environment
    pub fn new(token: Option<&str>) -> Result<Self> {
        let token = TokenResolver::resolve(token)?;
        Ok(Self {
            client: Arc::new(Client::new(token)),
        })
    }

    /// Create a connector around an existing client
    pub fn with_client(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// A syncer per resource kind that is synced from Calendly
    pub fn syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        vec![
            Box::new(OrgSyncer::new(Arc::clone(&self.client))),
            Box::new(UserSyncer::new(Arc::clone(&self.client))),
        ]
    }

    /// Metadata about the connector
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Calendly".to_string(),
            description:
                "Syncs a Calendly organization with its users, roles and pending invitations"
                    .to_string(),
        }
    }

    /// Exercise the credential with a lightweight read: fetch the current
    /// user, then the organization it belongs to. No side effects.
    pub async fn validate(&self) -> Result<()> {
        let (user, _) = self.client.get_current_user().await.map_err(|e| {
            ConnectorError::Config(format!("failed to validate credentials: {}", e))
        })?;

        self.client
            .get_org_details(&user.organization)
            .await
            .map_err(|e| {
                ConnectorError::Config(format!("failed to validate credentials: {}", e))
            })?;

        Ok(())
    }
}
