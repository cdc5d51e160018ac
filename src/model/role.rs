//! Workspace roles

use serde::{Deserialize, Serialize};

use crate::cache::NamedEntity;

/// A workspace role as served by the roles endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanRole {
    /// Role GUID
    pub id: String,

    /// Role name (e.g. `"$admin"`, `"$member"`)
    pub name: String,

    /// Description (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of users holding this role, serialized as a string on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<String>,
}

impl NamedEntity for AtlanRole {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Envelope returned by `GET /api/service/roles`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    /// Total number of roles in the workspace
    #[serde(default)]
    pub total_record: u64,

    /// Number of roles matching the request's filter
    #[serde(default)]
    pub filter_record: u64,

    /// The role records themselves
    #[serde(default)]
    pub records: Vec<AtlanRole>,
}
