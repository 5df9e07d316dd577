//! One pruning run, end to end: crawl → filter → keep-last → delete.

use chrono::{DateTime, Utc};
use tracing::Instrument;

use crate::config::PruneConfig;
use crate::crawler::Crawler;
use crate::domain::{PruneResult, Result, RetentionPolicy, Scope};
use crate::executor::prune_versions;
use crate::filter::is_prune_candidate;
use crate::obs;
use crate::reducer::retain_newest;
use crate::registry_traits::{DryRunSink, VersionRegistry, VersionSink, VersionSource};

/// A configured pruning run.
///
/// Holds no registry state; the same job can run against any adapter.
#[derive(Debug, Clone)]
pub struct PruneJob {
    policy: RetentionPolicy,
    dry_run: bool,
    crawler: Crawler,
    scope: Scope,
    package: String,
}

impl PruneJob {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            dry_run: false,
            crawler: Crawler::default(),
            scope: Scope::AuthenticatedUser,
            package: String::new(),
        }
    }

    pub fn from_config(config: &PruneConfig) -> Self {
        Self::new(config.policy.clone())
            .dry_run(config.dry_run)
            .labelled(config.scope.clone(), &config.package)
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_crawler(mut self, crawler: Crawler) -> Self {
        self.crawler = crawler;
        self
    }

    /// Scope and package recorded on the run span.
    pub fn labelled(mut self, scope: Scope, package: &str) -> Self {
        self.scope = scope;
        self.package = package.to_string();
        self
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Run against a registry that lists and deletes. In dry-run mode
    /// deletions go to a [`DryRunSink`] instead.
    pub async fn run<R>(&self, registry: &R, now: DateTime<Utc>) -> Result<PruneResult>
    where
        R: VersionRegistry + ?Sized,
    {
        if self.dry_run {
            self.run_with(registry, &DryRunSink, now).await
        } else {
            self.run_with(registry, registry, now).await
        }
    }

    /// Run with an explicit source and sink.
    ///
    /// Listing errors abort the run with `Err`. A deletion error does not: it
    /// is recorded in [`PruneResult::failure`] next to whatever was already
    /// pruned.
    pub async fn run_with<S, K>(&self, source: &S, sink: &K, now: DateTime<Utc>) -> Result<PruneResult>
    where
        S: VersionSource + ?Sized,
        K: VersionSink + ?Sized,
    {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = obs::run_span(&run_id, &self.scope, &self.package);
        self.execute(run_id, source, sink, now)
            .instrument(span)
            .await
    }

    async fn execute<S, K>(
        &self,
        run_id: String,
        source: &S,
        sink: &K,
        now: DateTime<Utc>,
    ) -> Result<PruneResult>
    where
        S: VersionSource + ?Sized,
        K: VersionSink + ?Sized,
    {
        obs::emit_run_started(self.dry_run, self.policy.keep_last);

        let crawl = self
            .crawler
            .collect(source, |version| is_prune_candidate(version, &self.policy, now))
            .await?;

        let candidate_count = crawl.matched.len();
        let reduction = retain_newest(crawl.matched, self.policy.keep_last);
        obs::emit_reduced(candidate_count, reduction.survivors.len());

        let execution = prune_versions(sink, reduction.to_delete).await;

        let result = PruneResult {
            run_id,
            dry_run: self.dry_run,
            versions_seen: crawl.versions_seen,
            pages_fetched: crawl.pages_fetched,
            candidate_count,
            survivors: reduction.survivors,
            pruned: execution.pruned,
            failure: execution.failure,
        };
        obs::emit_run_finished(&result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PruneError, Version, VersionId};
    use crate::fakes::MemoryRegistry;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn version(id: u64, created_at: &str, tags: &[&str]) -> Version {
        Version::new(
            id,
            format!("sha256:{id:04}"),
            created_at.parse().unwrap(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_untagged_scenario() {
        let registry = MemoryRegistry::with_versions(vec![
            version(1, "2019-11-05T22:49:04Z", &[]),
            version(2, "2019-10-29T15:42:11Z", &["v1.0.3"]),
        ]);
        let job = PruneJob::new(RetentionPolicy::new().with_prune_untagged(true));
        let result = job.run(&registry, now()).await.unwrap();

        assert_eq!(result.candidate_count, 1);
        assert_eq!(result.pruned_ids(), vec![VersionId(1)]);
        assert!(result.is_complete());
        assert_eq!(registry.remaining().len(), 1);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_registry_untouched() {
        let registry = MemoryRegistry::with_versions(vec![
            version(1, "2019-11-05T22:49:04Z", &[]),
            version(2, "2019-10-29T15:42:11Z", &[]),
        ]);
        let job = PruneJob::new(RetentionPolicy::new().with_prune_untagged(true)).dry_run(true);
        let result = job.run(&registry, now()).await.unwrap();

        assert!(result.dry_run);
        assert_eq!(result.pruned_count(), 2);
        assert!(registry.delete_calls().is_empty());
        assert_eq!(registry.remaining().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_crawler_and_config() {
        let registry = MemoryRegistry::with_versions(vec![
            version(1, "2019-11-05T22:49:04Z", &[]),
            version(2, "2019-11-04T22:49:04Z", &[]),
            version(3, "2019-11-03T22:49:04Z", &[]),
        ]);
        let config = PruneConfig {
            scope: Scope::Organization("acme".to_string()),
            package: "api".to_string(),
            dry_run: false,
            policy: RetentionPolicy::new()
                .with_prune_untagged(true)
                .with_keep_last(1),
        };
        let job = PruneJob::from_config(&config).with_crawler(Crawler::new(2));
        assert_eq!(job.policy().keep_last, 1);

        let result = job.run(&registry, now()).await.unwrap();

        assert_eq!(registry.list_calls(), vec![(2, 1), (2, 2)]);
        assert_eq!(result.pages_fetched, 2);
        assert_eq!(result.survivors[0].id, VersionId(1));
        assert_eq!(result.pruned_ids(), vec![VersionId(2), VersionId(3)]);
    }

    #[tokio::test]
    async fn test_listing_failure_deletes_nothing() {
        let versions: Vec<Version> = (0..150)
            .map(|i| version(i, "2019-11-05T22:49:04Z", &[]))
            .collect();
        let registry = MemoryRegistry::with_versions(versions).fail_page(2);
        let job = PruneJob::new(RetentionPolicy::new().with_prune_untagged(true));
        let err = job.run(&registry, now()).await.unwrap_err();

        assert!(matches!(err, PruneError::List { page: 2, .. }));
        assert!(registry.delete_calls().is_empty());
    }
}
