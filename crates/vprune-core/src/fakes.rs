//! In-memory registry fake (testing only)
//!
//! `MemoryRegistry` serves pages out of a `Vec<Version>` and records every
//! call it receives. Listing and deletion failures can be scripted to
//! exercise the abort paths of the retention engine.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{RegistryError, RegistryResult, Version, VersionId};
use crate::registry_traits::{VersionSink, VersionSource};

#[derive(Debug, Default)]
struct State {
    versions: Vec<Version>,
    list_calls: Vec<(u32, u32)>,
    delete_calls: Vec<VersionId>,
    failing_pages: HashSet<u32>,
    failing_deletes: HashSet<VersionId>,
    failing_delete_calls: HashSet<usize>,
}

/// In-memory package registry backed by a `Vec<Version>` in listing order.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    state: Mutex<State>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(versions: Vec<Version>) -> Self {
        let registry = Self::new();
        registry.state.lock().unwrap().versions = versions;
        registry
    }

    /// Make every request for `page` fail.
    pub fn fail_page(self, page: u32) -> Self {
        self.state.lock().unwrap().failing_pages.insert(page);
        self
    }

    /// Make deletion of `id` fail.
    pub fn fail_delete_of(self, id: impl Into<VersionId>) -> Self {
        self.state.lock().unwrap().failing_deletes.insert(id.into());
        self
    }

    /// Make the `call`-th deletion request (1-based) fail.
    pub fn fail_delete_call(self, call: usize) -> Self {
        self.state.lock().unwrap().failing_delete_calls.insert(call);
        self
    }

    /// `(page_size, page)` of every listing request, in order.
    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.state.lock().unwrap().list_calls.clone()
    }

    /// Version ids of every deletion request, in order, including failed ones.
    pub fn delete_calls(&self) -> Vec<VersionId> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    /// Versions still stored.
    pub fn remaining(&self) -> Vec<Version> {
        self.state.lock().unwrap().versions.clone()
    }
}

#[async_trait]
impl VersionSource for MemoryRegistry {
    async fn list_page(&self, page_size: u32, page: u32) -> RegistryResult<Vec<Version>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls.push((page_size, page));
        if state.failing_pages.contains(&page) {
            return Err(RegistryError::Unavailable(format!(
                "page {page} is scripted to fail"
            )));
        }
        let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
        Ok(state
            .versions
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VersionSink for MemoryRegistry {
    async fn delete(&self, version: &Version) -> RegistryResult<()> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(version.id);
        let call = state.delete_calls.len();
        if state.failing_deletes.contains(&version.id) || state.failing_delete_calls.contains(&call)
        {
            return Err(RegistryError::Rejected {
                status: 500,
                message: format!("deletion of {} is scripted to fail", version.id),
            });
        }
        let before = state.versions.len();
        state.versions.retain(|v| v.id != version.id);
        if state.versions.len() == before {
            return Err(RegistryError::Rejected {
                status: 404,
                message: format!("version {} not found", version.id),
            });
        }
        Ok(())
    }
}
