//! What a pruning run reports back to its caller.

use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use super::version::{Version, VersionId};

/// The deletion that stopped a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionFailure {
    pub version_id: VersionId,
    pub version_name: String,
    pub message: String,
}

impl DeletionFailure {
    pub fn new(version: &Version, error: &RegistryError) -> Self {
        Self {
            version_id: version.id,
            version_name: version.name.clone(),
            message: error.to_string(),
        }
    }
}

/// Outcome of one pruning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneResult {
    pub run_id: String,
    pub dry_run: bool,
    /// Versions returned by the registry across all pages.
    pub versions_seen: usize,
    pub pages_fetched: u32,
    /// Versions the policy marked for pruning, before keep-last.
    pub candidate_count: usize,
    /// Candidates spared by keep-last, newest first.
    pub survivors: Vec<Version>,
    /// Versions actually deleted (or reported, in dry-run), in deletion order.
    pub pruned: Vec<Version>,
    pub failure: Option<DeletionFailure>,
}

impl PruneResult {
    pub fn pruned_count(&self) -> usize {
        self.pruned.len()
    }

    pub fn pruned_ids(&self) -> Vec<VersionId> {
        self.pruned.iter().map(|v| v.id).collect()
    }

    /// Number of versions the run intended to delete.
    pub fn scheduled_count(&self) -> usize {
        self.candidate_count - self.survivors.len()
    }

    /// True when every scheduled deletion went through.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.pruned.len() == self.scheduled_count()
    }
}
