//! Run summary rendering and GitHub Actions step outputs.

use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use vprune_core::{DeletionFailure, PruneConfig, PruneResult, VersionId};

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub package: String,
    pub scope: String,
    pub dry_run: bool,
    pub versions_seen: usize,
    pub candidates: usize,
    pub scheduled: usize,
    pub pruned_count: usize,
    pub pruned_ids: Vec<VersionId>,
    pub kept_by_keep_last: Vec<VersionId>,
    pub failure: Option<DeletionFailure>,
    pub complete: bool,
}

impl RunSummary {
    pub fn new(config: &PruneConfig, result: &PruneResult) -> Self {
        Self {
            run_id: result.run_id.clone(),
            package: config.package.clone(),
            scope: config.scope.to_string(),
            dry_run: result.dry_run,
            versions_seen: result.versions_seen,
            candidates: result.candidate_count,
            scheduled: result.scheduled_count(),
            pruned_count: result.pruned_count(),
            pruned_ids: result.pruned_ids(),
            kept_by_keep_last: result.survivors.iter().map(|v| v.id).collect(),
            failure: result.failure.clone(),
            complete: result.is_complete(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mode = if self.dry_run { " (dry run)" } else { "" };
        let _ = writeln!(out, "Package {} ({}){}", self.package, self.scope, mode);
        let _ = writeln!(
            out,
            "  versions seen:     {}\n  prune candidates:  {}\n  kept by keep-last: {}",
            self.versions_seen,
            self.candidates,
            self.kept_by_keep_last.len()
        );
        let verb = if self.dry_run { "would prune" } else { "pruned" };
        let _ = writeln!(
            out,
            "  {}: {} of {}",
            verb, self.pruned_count, self.scheduled
        );
        if !self.pruned_ids.is_empty() {
            let _ = writeln!(out, "  ids: {}", join_ids(&self.pruned_ids));
        }
        if let Some(failure) = &self.failure {
            let _ = writeln!(
                out,
                "  failed at version {} ({}): {}",
                failure.version_id, failure.version_name, failure.message
            );
        }
        out
    }
}

fn join_ids(ids: &[VersionId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Append `count`, `pruned-versions` and `dry-run` to the step outputs file.
pub fn write_github_outputs(path: &Path, result: &PruneResult) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "count={}", result.pruned_count())?;
    writeln!(file, "pruned-versions={}", join_ids(&result.pruned_ids()))?;
    writeln!(file, "dry-run={}", result.dry_run)?;
    Ok(())
}
