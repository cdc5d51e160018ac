//! Data-quality rule template configurations

use serde::{Deserialize, Serialize};

use crate::cache::NamedEntity;

/// A data-quality rule template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DqTemplateConfig {
    /// Configuration GUID
    pub guid: String,

    /// Human-readable configuration name
    pub name: String,

    /// Rule type this template configures (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
}

impl NamedEntity for DqTemplateConfig {
    fn id(&self) -> &str {
        &self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Envelope returned by `GET /api/meta/dq/template-configs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqTemplateConfigResponse {
    /// The template configuration records
    #[serde(default)]
    pub records: Vec<DqTemplateConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_template_config() {
        let json = serde_json::json!({
            "records": [
                { "guid": "dq-123", "name": "null-check-default", "ruleType": "Completeness" }
            ]
        });

        let response: DqTemplateConfigResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0].id(), "dq-123");
        assert_eq!(response.records[0].name(), "null-check-default");
        assert_eq!(
            response.records[0].rule_type.as_deref(),
            Some("Completeness")
        );
    }
}
