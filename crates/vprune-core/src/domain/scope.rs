//! Owner scope a package lives under.

use serde::{Deserialize, Serialize};

use super::error::{PruneError, Result};

/// Owner context used to list and delete versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Scope {
    Organization(String),
    User(String),
    /// The identity the credential belongs to.
    AuthenticatedUser,
}

impl Scope {
    /// Resolve the scope from the two optional selectors.
    ///
    /// Blank selectors count as absent. Supplying both is a configuration
    /// error; supplying neither selects the authenticated user.
    pub fn from_selectors(organization: Option<&str>, user: Option<&str>) -> Result<Self> {
        let organization = organization.map(str::trim).filter(|s| !s.is_empty());
        let user = user.map(str::trim).filter(|s| !s.is_empty());

        match (organization, user) {
            (Some(organization), Some(user)) => Err(PruneError::ConflictingScope {
                organization: organization.to_string(),
                user: user.to_string(),
            }),
            (Some(organization), None) => Ok(Scope::Organization(organization.to_string())),
            (None, Some(user)) => Ok(Scope::User(user.to_string())),
            (None, None) => Ok(Scope::AuthenticatedUser),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Organization(org) => write!(f, "org:{org}"),
            Scope::User(user) => write!(f, "user:{user}"),
            Scope::AuthenticatedUser => write!(f, "authenticated-user"),
        }
    }
}
