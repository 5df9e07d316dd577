//! github-packages: GitHub Packages adapters for vprune
//!
//! Implements the `VersionSource` and `VersionSink` traits of `vprune-core`
//! over the GitHub REST API, one adapter per owner scope. Only active
//! container package versions are listed.

pub mod adapters;
pub mod client;
pub mod error;
pub mod wire;

pub use adapters::{registry_for, AuthenticatedUserPackages, OrgPackages, UserPackages};
pub use client::{GithubClient, GithubConfig, DEFAULT_API_URL};
pub use error::GithubError;
pub use wire::PackageVersion;

/// Result type for github-packages operations
pub type Result<T> = std::result::Result<T, GithubError>;
