//! Wire-format models for the Atlan API surfaces the caches resolve against
//!
//! Only the handful of types the resolving caches and their transport need
//! are modeled here; the full generated asset model tree is out of scope.

pub mod classification;
pub mod dq_template;
pub mod role;

pub use classification::{ClassificationDef, TypeDefResponse};
pub use dq_template::{DqTemplateConfig, DqTemplateConfigResponse};
pub use role::{AtlanRole, RoleResponse};
