//! Sequential, fail-fast deletion of the final prune list.

use crate::domain::{DeletionFailure, Version};
use crate::obs;
use crate::registry_traits::VersionSink;

/// What the executor managed to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// Deleted versions, in deletion order.
    pub pruned: Vec<Version>,
    /// The deletion that stopped execution, if any.
    pub failure: Option<DeletionFailure>,
}

/// Delete `versions` one at a time, in order.
///
/// Stops at the first failure: versions after it are never attempted and
/// versions before it stay deleted. Nothing is retried.
pub async fn prune_versions<S>(sink: &S, versions: Vec<Version>) -> Execution
where
    S: VersionSink + ?Sized,
{
    let total = versions.len();
    let mut execution = Execution {
        pruned: Vec::with_capacity(total),
        failure: None,
    };

    for version in versions {
        obs::emit_pruning_version(&version);
        match sink.delete(&version).await {
            Ok(()) => execution.pruned.push(version),
            Err(error) => {
                obs::emit_prune_failed(&version, &error);
                execution.failure = Some(DeletionFailure::new(&version, &error));
                break;
            }
        }
    }

    obs::emit_prune_finished(execution.pruned.len(), total);
    execution
}
