//! Domain models for vprune.
//!
//! - `Version`: one stored revision of a container package
//! - `RetentionPolicy`: rules deciding which versions are stale
//! - `Scope`: owner context of the package
//! - `PruneResult`: what a run did

pub mod error;
pub mod outcome;
pub mod policy;
pub mod scope;
pub mod version;

pub use error::{PruneError, RegistryError, RegistryResult, Result};
pub use outcome::{DeletionFailure, PruneResult};
pub use policy::RetentionPolicy;
pub use scope::Scope;
pub use version::{Version, VersionId};
