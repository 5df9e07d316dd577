//! Structured observability hooks for pruning runs.
//!
//! This module provides:
//! - A run-scoped tracing span via `run_span`
//! - Emission functions for crawl, reduction, deletion and run lifecycle events
//!
//! The crate never installs a subscriber; see [`crate::telemetry`].

use tracing::{debug, info, warn};

use crate::domain::{PruneResult, RegistryError, Scope, Version};

/// Span tagging every event of one run with its id, scope and package.
///
/// Attach it with `tracing::Instrument` so the run future stays `Send`:
///
/// ```ignore
/// job.run(&registry, now).instrument(run_span(&run_id, &scope, "my-image")).await
/// ```
pub fn run_span(run_id: &str, scope: &Scope, package: &str) -> tracing::Span {
    tracing::info_span!(
        "vprune.run",
        run_id = %run_id,
        scope = %scope,
        package = %package,
    )
}

pub fn emit_run_started(dry_run: bool, keep_last: usize) {
    info!(event = "run.started", dry_run = dry_run, keep_last = keep_last);
}

/// Emit event: one page of versions listed and filtered.
pub fn emit_page_crawled(page: u32, fetched: usize, matched: usize) {
    info!(
        event = "crawl.page",
        page = page,
        fetched = fetched,
        matched = matched,
        "found {matched} versions to prune out of {fetched} on page {page}"
    );
}

pub fn emit_crawl_finished(pages: u32, versions_seen: usize, matched: usize) {
    info!(
        event = "crawl.finished",
        pages = pages,
        versions_seen = versions_seen,
        matched = matched,
    );
}

/// Emit event: keep-last spared `survivors` of `candidates`.
pub fn emit_reduced(candidates: usize, survivors: usize) {
    info!(
        event = "reduce.finished",
        candidates = candidates,
        survivors = survivors,
        scheduled = candidates - survivors,
    );
}

pub fn emit_pruning_version(version: &Version) {
    debug!(
        event = "prune.version",
        version_id = %version.id,
        name = %version.name,
        tags = ?version.tags,
    );
}

pub fn emit_dry_run_delete(version: &Version) {
    info!(
        event = "prune.dry_run",
        version_id = %version.id,
        name = %version.name,
        created_at = %version.created_at,
        tags = ?version.tags,
        "dry-run: would delete version"
    );
}

/// Emit event: a deletion failed and the run stops (warning level).
pub fn emit_prune_failed(version: &Version, error: &RegistryError) {
    warn!(
        event = "prune.failed",
        version_id = %version.id,
        name = %version.name,
        error = %error,
    );
}

pub fn emit_prune_finished(pruned: usize, scheduled: usize) {
    info!(event = "prune.finished", pruned = pruned, scheduled = scheduled);
}

/// Emit event: run finished with counts and completion status.
pub fn emit_run_finished(result: &PruneResult) {
    info!(
        event = "run.finished",
        dry_run = result.dry_run,
        versions_seen = result.versions_seen,
        candidates = result.candidate_count,
        pruned = result.pruned_count(),
        complete = result.is_complete(),
    );
}
