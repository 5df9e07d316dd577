//! Response bodies of the GitHub Packages REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use vprune_core::Version;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ContainerMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Metadata {
    pub package_type: Option<String>,
    pub container: Option<ContainerMetadata>,
}

/// One entry of `GET …/packages/container/{name}/versions`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PackageVersion {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl From<PackageVersion> for Version {
    fn from(v: PackageVersion) -> Self {
        let tags = v
            .metadata
            .and_then(|m| m.container)
            .map(|c| c.tags)
            .unwrap_or_default();
        Version::new(v.id, v.name, v.created_at, tags)
    }
}

/// Error body GitHub sends with 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vprune_core::VersionId;

    #[test]
    fn test_decode_tagged_version() {
        let body = r#"[{
            "id": 245301,
            "name": "sha256:3b9f0a7c",
            "url": "https://api.github.com/orgs/acme/packages/container/api/versions/245301",
            "package_html_url": "https://github.com/orgs/acme/packages/container/package/api",
            "created_at": "2019-11-05T22:49:04Z",
            "updated_at": "2019-11-05T22:49:04Z",
            "html_url": "https://github.com/orgs/acme/packages/container/api/245301",
            "metadata": {
                "package_type": "container",
                "container": { "tags": ["v1.0.4", "latest"] }
            }
        }]"#;
        let versions: Vec<PackageVersion> = serde_json::from_str(body).unwrap();
        let version: Version = versions.into_iter().next().unwrap().into();
        assert_eq!(version.id, VersionId(245301));
        assert_eq!(version.tags, vec!["v1.0.4", "latest"]);
    }

    #[test]
    fn test_missing_metadata_means_untagged() {
        let body = r#"{
            "id": 7,
            "name": "sha256:0000",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": null
        }"#;
        let version: Version = serde_json::from_str::<PackageVersion>(body).unwrap().into();
        assert!(version.is_untagged());
    }

    #[test]
    fn test_empty_container_metadata_means_untagged() {
        let body = r#"{
            "id": 8,
            "name": "sha256:1111",
            "created_at": "2020-01-01T00:00:00Z",
            "metadata": { "package_type": "container", "container": {} }
        }"#;
        let version: Version = serde_json::from_str::<PackageVersion>(body).unwrap().into();
        assert!(version.is_untagged());
    }
}
