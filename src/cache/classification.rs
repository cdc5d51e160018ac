//! Classification (tag) name/ID resolution

use std::sync::Arc;

use async_trait::async_trait;

use super::{EntitySource, ResolvingCache};
use crate::error::AtlanError;
use crate::model::{ClassificationDef, TypeDefResponse};
use crate::transport::ApiTransport;

/// Fetches the full classification typedef set from the metadata API
#[derive(Debug)]
pub struct ClassificationSource {
    transport: Arc<ApiTransport>,
}

impl ClassificationSource {
    /// Create a source over the shared transport
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl EntitySource for ClassificationSource {
    type Entity = ClassificationDef;

    async fn fetch_all(&self) -> Result<Vec<ClassificationDef>, AtlanError> {
        let response: TypeDefResponse = self
            .transport
            .get_json("/api/meta/types/typedefs", &[("type", "classification")])
            .await?;
        Ok(response.classification_defs)
    }
}

/// Resolves classification display names to internal hashed type names
/// and back
pub type ClassificationCache = ResolvingCache<ClassificationSource>;

impl ClassificationCache {
    /// Build the classification cache over the shared transport
    pub(crate) fn over(transport: Arc<ApiTransport>) -> Self {
        ResolvingCache::new("classification", ClassificationSource::new(transport))
    }
}
