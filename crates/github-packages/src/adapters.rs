//! Scope adapters implementing the vprune registry traits.
//!
//! One adapter per owner scope, each bound to a single container package:
//! - `OrgPackages`: `/orgs/{org}/packages/container/{name}/versions`
//! - `UserPackages`: `/users/{user}/packages/container/{name}/versions`
//! - `AuthenticatedUserPackages`: `/user/packages/container/{name}/versions`

use async_trait::async_trait;
use reqwest::Url;
use vprune_core::{RegistryResult, Scope, Version, VersionRegistry, VersionSink, VersionSource};

use crate::client::GithubClient;
use crate::Result;

/// Package type segment of every endpoint.
pub const PACKAGE_TYPE: &str = "container";

/// Container package owned by an organization.
#[derive(Debug, Clone)]
pub struct OrgPackages {
    client: GithubClient,
    org: String,
    package: String,
}

/// Container package owned by a named user.
#[derive(Debug, Clone)]
pub struct UserPackages {
    client: GithubClient,
    user: String,
    package: String,
}

/// Container package owned by whoever the token belongs to.
#[derive(Debug, Clone)]
pub struct AuthenticatedUserPackages {
    client: GithubClient,
    package: String,
}

impl OrgPackages {
    pub fn new(client: GithubClient, org: &str, package: &str) -> Self {
        Self {
            client,
            org: org.to_string(),
            package: package.to_string(),
        }
    }

    pub fn versions_url(&self) -> Result<Url> {
        self.client.endpoint(&[
            "orgs",
            &self.org,
            "packages",
            PACKAGE_TYPE,
            &self.package,
            "versions",
        ])
    }
}

impl UserPackages {
    pub fn new(client: GithubClient, user: &str, package: &str) -> Self {
        Self {
            client,
            user: user.to_string(),
            package: package.to_string(),
        }
    }

    pub fn versions_url(&self) -> Result<Url> {
        self.client.endpoint(&[
            "users",
            &self.user,
            "packages",
            PACKAGE_TYPE,
            &self.package,
            "versions",
        ])
    }
}

impl AuthenticatedUserPackages {
    pub fn new(client: GithubClient, package: &str) -> Self {
        Self {
            client,
            package: package.to_string(),
        }
    }

    pub fn versions_url(&self) -> Result<Url> {
        self.client
            .endpoint(&["user", "packages", PACKAGE_TYPE, &self.package, "versions"])
    }
}

fn version_url(mut versions_url: Url, version: &Version) -> Url {
    if let Ok(mut segments) = versions_url.path_segments_mut() {
        segments.push(&version.id.to_string());
    }
    versions_url
}

macro_rules! impl_registry {
    ($adapter:ty) => {
        #[async_trait]
        impl VersionSource for $adapter {
            async fn list_page(&self, page_size: u32, page: u32) -> RegistryResult<Vec<Version>> {
                let versions = self
                    .client
                    .list_versions(self.versions_url()?, page_size, page)
                    .await?;
                Ok(versions.into_iter().map(Version::from).collect())
            }
        }

        #[async_trait]
        impl VersionSink for $adapter {
            async fn delete(&self, version: &Version) -> RegistryResult<()> {
                let url = version_url(self.versions_url()?, version);
                Ok(self.client.delete_version(url).await?)
            }
        }
    };
}

impl_registry!(OrgPackages);
impl_registry!(UserPackages);
impl_registry!(AuthenticatedUserPackages);

/// Pick the adapter for `scope`.
pub fn registry_for(client: GithubClient, scope: &Scope, package: &str) -> Box<dyn VersionRegistry> {
    match scope {
        Scope::Organization(org) => Box::new(OrgPackages::new(client, org, package)),
        Scope::User(user) => Box::new(UserPackages::new(client, user, package)),
        Scope::AuthenticatedUser => Box::new(AuthenticatedUserPackages::new(client, package)),
    }
}
