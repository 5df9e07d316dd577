//! Retention filter: classifies a single version against a policy.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! 1. Younger than `keep_younger_than_days` → keep
//! 2. Untagged and `prune_untagged` → prune
//! 3. Any tag listed in `keep_tags` → keep
//! 4. Any tag matching `keep_tags_regexes` → keep
//! 5. Any tag matching `prune_tags_regexes` → prune
//! 6. Otherwise → keep

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::domain::{RetentionPolicy, Version};

/// Why a version is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepReason {
    TooYoung,
    KeepTag,
    KeepTagPattern,
    NoRuleMatched,
}

/// Why a version is a prune candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneReason {
    Untagged,
    PruneTagPattern,
}

/// Outcome of evaluating a version against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Keep(KeepReason),
    Prune(PruneReason),
}

impl Decision {
    pub fn is_prune(&self) -> bool {
        matches!(self, Decision::Prune(_))
    }
}

fn any_tag_matches(patterns: &[Regex], tags: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| tags.iter().any(|tag| pattern.is_match(tag)))
}

/// Classify `version` under `policy`, with ages measured at `now`.
pub fn decide(version: &Version, policy: &RetentionPolicy, now: DateTime<Utc>) -> Decision {
    if version.age_in_days(now) < i64::from(policy.keep_younger_than_days) {
        return Decision::Keep(KeepReason::TooYoung);
    }

    if policy.prune_untagged && version.is_untagged() {
        return Decision::Prune(PruneReason::Untagged);
    }

    if version.tags.iter().any(|tag| policy.keep_tags.contains(tag)) {
        return Decision::Keep(KeepReason::KeepTag);
    }

    if any_tag_matches(&policy.keep_tags_regexes, &version.tags) {
        return Decision::Keep(KeepReason::KeepTagPattern);
    }

    if any_tag_matches(&policy.prune_tags_regexes, &version.tags) {
        return Decision::Prune(PruneReason::PruneTagPattern);
    }

    Decision::Keep(KeepReason::NoRuleMatched)
}

/// Shorthand for `decide(..).is_prune()`.
pub fn is_prune_candidate(version: &Version, policy: &RetentionPolicy, now: DateTime<Utc>) -> bool {
    decide(version, policy, now).is_prune()
}
