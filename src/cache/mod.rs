//! Lazily-populated name/ID resolution caches
//!
//! Each cache translates between a human-readable name and a
//! service-internal identifier for one namespace of server-defined
//! entities (classifications, roles, data-quality template configs),
//! minimizing redundant network calls while tolerating staleness.

mod classification;
mod dq_template;
mod resolving;
mod role;

pub use classification::{ClassificationCache, ClassificationSource};
pub use dq_template::{DqTemplateConfigCache, DqTemplateConfigSource};
pub use resolving::{CacheStats, ResolvingCache};
pub use role::{RoleCache, RoleSource};

use async_trait::async_trait;

use crate::error::AtlanError;

/// A server-side object identified by both an opaque ID and a display name
///
/// IDs are stable and unique per namespace. Names are unique at any point
/// in time but may be reused after deletion; the last fetched mapping is
/// treated as authoritative.
pub trait NamedEntity: Clone + Send + Sync + 'static {
    /// Opaque, stable, service-internal identifier
    fn id(&self) -> &str;

    /// Human-readable display name
    fn name(&self) -> &str;
}

/// Backing collaborator a [`ResolvingCache`] repopulates from
///
/// A refresh fetches the complete current set of entities for the
/// namespace in one call; pagination, if any, is the implementor's
/// concern. An empty result is a "no data" signal and leaves the cache's
/// existing snapshot untouched.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Entity type this source yields
    type Entity: NamedEntity;

    /// Fetch the full current entity set for the namespace
    async fn fetch_all(&self) -> Result<Vec<Self::Entity>, AtlanError>;
}
