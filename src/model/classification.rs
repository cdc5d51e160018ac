//! Classification (tag) type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::NamedEntity;

/// A classification type definition as served by the typedefs endpoint
///
/// The server-assigned `name` is an opaque hashed identifier; the
/// `display_name` is what users see and search by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationDef {
    /// Opaque, stable internal type name (e.g. `"yzJ3so9kA92Xb1pQ"`)
    pub name: String,

    /// Human-readable display name
    pub display_name: String,

    /// Description shown in the catalog UI (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Asset type names this classification may be attached to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,

    /// Creation timestamp (epoch milliseconds on the wire)
    #[serde(
        default,
        rename = "createTime",
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Last-update timestamp (epoch milliseconds on the wire)
    #[serde(
        default,
        rename = "updateTime",
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NamedEntity for ClassificationDef {
    fn id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

/// Envelope returned by `GET /api/meta/types/typedefs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefResponse {
    /// Classification definitions matching the requested type filter
    #[serde(default)]
    pub classification_defs: Vec<ClassificationDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_typedef_response() {
        let json = serde_json::json!({
            "classificationDefs": [
                {
                    "name": "yzJ3so9kA92Xb1pQ",
                    "displayName": "PII",
                    "description": "Personally identifiable information",
                    "entityTypes": ["Table", "Column"],
                    "createTime": 1_700_000_000_000_i64
                }
            ]
        });

        let response: TypeDefResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.classification_defs.len(), 1);

        let def = &response.classification_defs[0];
        assert_eq!(def.id(), "yzJ3so9kA92Xb1pQ");
        assert_eq!(def.name(), "PII");
        assert_eq!(def.entity_types, vec!["Table", "Column"]);
        assert!(def.created_at.is_some());
        assert!(def.updated_at.is_none());
    }

    #[test]
    fn test_deserialize_empty_response() {
        let response: TypeDefResponse = serde_json::from_str("{}").unwrap();
        assert!(response.classification_defs.is_empty());
    }
}
