//! Retention policy value object.

use std::collections::BTreeSet;

use regex::Regex;

use super::error::{PruneError, Result};

/// Which versions are stale and which must survive.
///
/// Patterns are compiled when they are added, so a policy that exists is
/// always usable. Keep rules take precedence over prune rules; see
/// [`crate::filter::decide`] for the evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
    /// Versions younger than this many days are always kept.
    pub keep_younger_than_days: u32,
    /// Prune versions without any tag.
    pub prune_untagged: bool,
    /// A version with a tag matching any of these is a prune candidate.
    pub prune_tags_regexes: Vec<Regex>,
    /// A version carrying any of these exact tags is kept.
    pub keep_tags: BTreeSet<String>,
    /// A version with a tag matching any of these is kept.
    pub keep_tags_regexes: Vec<Regex>,
    /// Number of most recent prune candidates spared from deletion.
    pub keep_last: usize,
}

impl RetentionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_younger_than_days(mut self, days: u32) -> Self {
        self.keep_younger_than_days = days;
        self
    }

    pub fn with_prune_untagged(mut self, prune_untagged: bool) -> Self {
        self.prune_untagged = prune_untagged;
        self
    }

    pub fn with_keep_last(mut self, keep_last: usize) -> Self {
        self.keep_last = keep_last;
        self
    }

    pub fn with_keep_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_prune_tags_regexes<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.prune_tags_regexes
            .extend(compile_patterns("prune-tags-regexes", patterns)?);
        Ok(self)
    }

    pub fn with_keep_tags_regexes<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keep_tags_regexes
            .extend(compile_patterns("keep-tags-regexes", patterns)?);
        Ok(self)
    }

    /// True when no rule can ever mark a version for pruning.
    pub fn prunes_nothing(&self) -> bool {
        !self.prune_untagged && self.prune_tags_regexes.is_empty()
    }
}

/// Compile every pattern, failing on the first invalid one.
///
/// Patterns use `regex` syntax, which has no lookaround: `^(?!latest$)`
/// is rejected rather than silently reinterpreted.
pub(crate) fn compile_patterns<I, S>(field: &'static str, patterns: I) -> Result<Vec<Regex>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(pattern).map_err(|source| PruneError::InvalidPattern {
                field,
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}
