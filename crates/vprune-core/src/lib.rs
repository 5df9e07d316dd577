//! vprune core library
//!
//! Retention engine for container package versions: pages through every
//! active version of a package, classifies each one against a
//! [`RetentionPolicy`], spares the newest `keep_last` candidates and deletes
//! the rest one at a time, stopping at the first failure.
//!
//! Registries plug in through the [`VersionSource`] and [`VersionSink`]
//! traits; this crate performs no I/O of its own.

pub mod config;
pub mod crawler;
pub mod domain;
pub mod executor;
pub mod fakes;
pub mod filter;
pub mod job;
pub mod obs;
pub mod reducer;
pub mod registry_traits;
pub mod telemetry;

pub use config::{PruneConfig, PruneSettings};
pub use crawler::{Crawl, Crawler, PAGE_SIZE};
pub use domain::{
    DeletionFailure, PruneError, PruneResult, RegistryError, RegistryResult, Result,
    RetentionPolicy, Scope, Version, VersionId,
};
pub use executor::{prune_versions, Execution};
pub use filter::{decide, is_prune_candidate, Decision, KeepReason, PruneReason};
pub use job::PruneJob;
pub use reducer::{retain_newest, Reduction};
pub use registry_traits::{DryRunSink, VersionRegistry, VersionSink, VersionSource};
pub use telemetry::init_tracing;

/// vprune version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
