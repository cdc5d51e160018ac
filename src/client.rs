//! Client facade owning the transport and one cache per namespace

use std::sync::Arc;

use tracing::info;

use crate::cache::{ClassificationCache, DqTemplateConfigCache, RoleCache};
use crate::config::AtlanConfig;
use crate::error::AtlanError;
use crate::transport::ApiTransport;

/// Handle to one Atlan workspace
///
/// Each client instance owns its own resolving caches, so independent
/// clients (different workspaces, or separate test sessions) never share
/// or cross-contaminate cache state.
#[derive(Debug)]
pub struct AtlanClient {
    config: AtlanConfig,
    classifications: ClassificationCache,
    roles: RoleCache,
    dq_template_configs: DqTemplateConfigCache,
}

impl AtlanClient {
    /// Create a client from a configuration
    ///
    /// The configuration is validated before any connection setup; caches
    /// start empty and populate lazily on first lookup.
    pub fn new(config: AtlanConfig) -> Result<Self, AtlanError> {
        config
            .validate()
            .map_err(|e| AtlanError::InvalidRequest(e.to_string()))?;

        let transport = Arc::new(ApiTransport::new(&config)?);

        info!(base_url = %config.base_url, "Atlan client ready");

        Ok(Self {
            config,
            classifications: ClassificationCache::over(Arc::clone(&transport)),
            roles: RoleCache::over(Arc::clone(&transport)),
            dq_template_configs: DqTemplateConfigCache::over(transport),
        })
    }

    /// Create a client from `ATLAN_`-prefixed environment variables
    pub fn from_env() -> Result<Self, AtlanError> {
        let config =
            AtlanConfig::from_env().map_err(|e| AtlanError::InvalidRequest(e.to_string()))?;
        Self::new(config)
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &AtlanConfig {
        &self.config
    }

    /// Classification (tag) name/ID resolution for this workspace
    pub fn classifications(&self) -> &ClassificationCache {
        &self.classifications
    }

    /// Role name/GUID resolution for this workspace
    pub fn roles(&self) -> &RoleCache {
        &self.roles
    }

    /// Data-quality template configuration resolution for this workspace
    pub fn dq_template_configs(&self) -> &DqTemplateConfigCache {
        &self.dq_template_configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = AtlanConfig {
            base_url: "https://tenant.atlan.com".to_string(),
            api_key: "test-token".to_string(),
            timeout_secs: 30,
        };

        let client = AtlanClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = AtlanConfig {
            base_url: String::new(),
            api_key: "test-token".to_string(),
            timeout_secs: 30,
        };

        let err = AtlanClient::new(config).unwrap_err();
        assert!(matches!(err, AtlanError::InvalidRequest(_)));
    }
}
