//! Capability traits at the registry boundary.
//!
//! - `VersionSource`: paged listing of active versions
//! - `VersionSink`: deletion of a single version by id
//!
//! Both are bound to one scope and one package at construction, so the
//! retention engine never branches on where the package lives. In-memory
//! fakes are provided for testing via the `fakes` module.

use async_trait::async_trait;

use crate::domain::{RegistryResult, Version};
use crate::obs;

/// Paged listing of the active versions of one package.
///
/// Pages are 1-based. A page shorter than `page_size` is the last one.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn list_page(&self, page_size: u32, page: u32) -> RegistryResult<Vec<Version>>;
}

/// Deletion of versions of one package.
#[async_trait]
pub trait VersionSink: Send + Sync {
    /// Delete the version with `version.id`. Called at most once per version.
    async fn delete(&self, version: &Version) -> RegistryResult<()>;
}

/// A registry adapter that can both list and delete.
pub trait VersionRegistry: VersionSource + VersionSink {}

impl<T: VersionSource + VersionSink + ?Sized> VersionRegistry for T {}

/// Sink that reports the deletion it would make and changes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSink;

#[async_trait]
impl VersionSink for DryRunSink {
    async fn delete(&self, version: &Version) -> RegistryResult<()> {
        obs::emit_dry_run_delete(version);
        Ok(())
    }
}
