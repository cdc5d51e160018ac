//! Data-quality template configuration name/GUID resolution

use std::sync::Arc;

use async_trait::async_trait;

use super::{EntitySource, ResolvingCache};
use crate::error::AtlanError;
use crate::model::{DqTemplateConfig, DqTemplateConfigResponse};
use crate::transport::ApiTransport;

/// Fetches the full data-quality template configuration set
#[derive(Debug)]
pub struct DqTemplateConfigSource {
    transport: Arc<ApiTransport>,
}

impl DqTemplateConfigSource {
    /// Create a source over the shared transport
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl EntitySource for DqTemplateConfigSource {
    type Entity = DqTemplateConfig;

    async fn fetch_all(&self) -> Result<Vec<DqTemplateConfig>, AtlanError> {
        let response: DqTemplateConfigResponse = self
            .transport
            .get_json("/api/meta/dq/template-configs", &[])
            .await?;
        Ok(response.records)
    }
}

/// Resolves data-quality template configuration names to GUIDs and back
pub type DqTemplateConfigCache = ResolvingCache<DqTemplateConfigSource>;

impl DqTemplateConfigCache {
    /// Build the template configuration cache over the shared transport
    pub(crate) fn over(transport: Arc<ApiTransport>) -> Self {
        ResolvingCache::new("dq template config", DqTemplateConfigSource::new(transport))
    }
}
