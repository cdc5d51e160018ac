//! Atlan Client - Async SDK for the Atlan metadata catalog
//!
//! This crate provides a typed, instance-scoped client for an Atlan
//! workspace. Its centerpiece is the family of resolving caches:
//! bidirectional, lazily-populated name↔ID caches for server-defined
//! namespaces (classifications, roles, data-quality template configs)
//! with refresh-on-miss and negative-result memoization.
//!
//! # Architecture
//!
//! - **Model** (`model`): serde wire types for the API surfaces the
//!   caches resolve against
//! - **Cache** (`cache`): the generic [`ResolvingCache`] plus one
//!   specialization per namespace
//! - **Transport** (`transport`): a thin, pooled `reqwest` layer
//! - **Client** (`client`): the [`AtlanClient`] facade owning the
//!   transport and one cache set per instance
//!
//! # Example
//!
//! ```no_run
//! use atlan_client::AtlanClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AtlanClient::from_env()?;
//!
//!     // First lookup fetches the role set; later lookups are served
//!     // from the cache without I/O.
//!     if let Some(guid) = client.roles().get_id_for_name("$admin").await? {
//!         println!("$admin role GUID: {guid}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

// Re-export commonly used types for convenience
pub use cache::{
    CacheStats, ClassificationCache, DqTemplateConfigCache, EntitySource, NamedEntity,
    ResolvingCache, RoleCache,
};
pub use client::AtlanClient;
pub use config::{AtlanConfig, ConfigError};
pub use error::AtlanError;
pub use model::{AtlanRole, ClassificationDef, DqTemplateConfig};
