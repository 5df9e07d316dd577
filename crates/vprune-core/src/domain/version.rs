//! Package versions as seen by the retention engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_IN_DAY: i64 = 24 * 60 * 60 * 1000;

/// Registry-assigned identifier of a version, unique within its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub u64);

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VersionId {
    fn from(id: u64) -> Self {
        VersionId(id)
    }
}

/// One stored revision of a container package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    /// Display name, usually the manifest digest. Not unique.
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Tags in registry order; empty for untagged versions.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Version {
    pub fn new(
        id: impl Into<VersionId>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
            tags,
        }
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whole days elapsed between creation and `now`, rounded down.
    ///
    /// A version created in the future has a negative age.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at)
            .num_milliseconds()
            .div_euclid(MS_IN_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(created_at: DateTime<Utc>) -> Version {
        Version::new(1, "sha256:abc", created_at, Vec::new())
    }

    #[test]
    fn test_age_rounds_down() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let v = at(now - Duration::hours(47));
        assert_eq!(v.age_in_days(now), 1);

        let v = at(now - Duration::hours(48));
        assert_eq!(v.age_in_days(now), 2);
    }

    #[test]
    fn test_age_of_future_version_is_negative() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let v = at(now + Duration::hours(1));
        assert_eq!(v.age_in_days(now), -1);
    }

    #[test]
    fn test_version_deserializes_without_tags() {
        let v: Version = serde_json::from_value(serde_json::json!({
            "id": 245301,
            "name": "sha256:deadbeef",
            "created_at": "2019-11-05T22:49:04Z"
        }))
        .unwrap();
        assert_eq!(v.id, VersionId(245301));
        assert!(v.is_untagged());
    }
}
