//! Workspace role name/GUID resolution

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{EntitySource, ResolvingCache};
use crate::error::AtlanError;
use crate::model::{AtlanRole, RoleResponse};
use crate::transport::ApiTransport;

/// Fetches the full role set from the service API
#[derive(Debug)]
pub struct RoleSource {
    transport: Arc<ApiTransport>,
}

impl RoleSource {
    /// Create a source over the shared transport
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl EntitySource for RoleSource {
    type Entity = AtlanRole;

    async fn fetch_all(&self) -> Result<Vec<AtlanRole>, AtlanError> {
        let response: RoleResponse = self
            .transport
            .get_json("/api/service/roles", &[])
            .await?;
        debug!(
            total = response.total_record,
            returned = response.records.len(),
            "fetched workspace roles"
        );
        Ok(response.records)
    }
}

/// Resolves role names (e.g. `"$admin"`) to role GUIDs and back
pub type RoleCache = ResolvingCache<RoleSource>;

impl RoleCache {
    /// Build the role cache over the shared transport
    pub(crate) fn over(transport: Arc<ApiTransport>) -> Self {
        ResolvingCache::new("role", RoleSource::new(transport))
    }
}
