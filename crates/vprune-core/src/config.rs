//! Run configuration: raw settings and their validated form.
//!
//! `PruneSettings` mirrors the external inputs one to one, every field
//! optional. `PruneSettings::resolve` applies defaults, folds deprecated
//! aliases into their canonical fields and validates everything once, so the
//! engine only ever sees a `PruneConfig`.

use serde::Deserialize;
use tracing::warn;

use crate::domain::{PruneError, Result, RetentionPolicy, Scope};

/// Raw run inputs. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PruneSettings {
    pub organization: Option<String>,
    pub user: Option<String>,
    pub container: Option<String>,
    pub dry_run: Option<bool>,
    pub keep_last: Option<usize>,
    pub keep_younger_than: Option<u32>,
    pub prune_untagged: Option<bool>,
    pub prune_tags_regexes: Option<Vec<String>>,
    pub keep_tags: Option<Vec<String>>,
    pub keep_tags_regexes: Option<Vec<String>>,

    /// Deprecated alias of `keep_younger_than`.
    pub older_than: Option<u32>,
    /// Deprecated alias of `prune_untagged`.
    pub untagged: Option<bool>,
    /// Deprecated single-pattern alias of `prune_tags_regexes`.
    pub tag_regex: Option<String>,
}

/// Validated configuration of one pruning run.
#[derive(Debug, Clone)]
pub struct PruneConfig {
    pub scope: Scope,
    pub package: String,
    pub dry_run: bool,
    pub policy: RetentionPolicy,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Drops blank entries; the rest are kept exactly as given.
fn non_blank_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .map(|list| {
            list.into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty())
}

impl PruneSettings {
    /// Validate the settings and produce the run configuration.
    ///
    /// Fails before any registry call when both organization and user are
    /// set, when the package name is missing, or when a pattern does not
    /// compile.
    pub fn resolve(self) -> Result<PruneConfig> {
        let scope = Scope::from_selectors(self.organization.as_deref(), self.user.as_deref())?;
        let package = non_blank(self.container).ok_or(PruneError::MissingPackage)?;

        let keep_younger_than = match (self.keep_younger_than, self.older_than) {
            (Some(days), _) => days,
            (None, Some(days)) => {
                warn!(input = "older-than", replacement = "keep-younger-than", "deprecated input");
                days
            }
            (None, None) => 0,
        };

        let prune_untagged = match (self.prune_untagged, self.untagged) {
            (Some(flag), _) => flag,
            (None, Some(flag)) => {
                warn!(input = "untagged", replacement = "prune-untagged", "deprecated input");
                flag
            }
            (None, None) => false,
        };

        let prune_tags_regexes = match (
            non_blank_list(self.prune_tags_regexes),
            self.tag_regex.filter(|s| !s.trim().is_empty()),
        ) {
            (Some(patterns), _) => patterns,
            (None, Some(pattern)) => {
                warn!(input = "tag-regex", replacement = "prune-tags-regexes", "deprecated input");
                vec![pattern]
            }
            (None, None) => Vec::new(),
        };

        let policy = RetentionPolicy::new()
            .with_keep_younger_than_days(keep_younger_than)
            .with_prune_untagged(prune_untagged)
            .with_keep_last(self.keep_last.unwrap_or(0))
            .with_keep_tags(non_blank_list(self.keep_tags).unwrap_or_default())
            .with_prune_tags_regexes(prune_tags_regexes)?
            .with_keep_tags_regexes(non_blank_list(self.keep_tags_regexes).unwrap_or_default())?;

        Ok(PruneConfig {
            scope,
            package,
            dry_run: self.dry_run.unwrap_or(false),
            policy,
        })
    }
}
