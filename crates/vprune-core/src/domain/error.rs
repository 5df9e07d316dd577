//! Error taxonomy for pruning runs.

use super::version::VersionId;

/// Failure reported by a version source or sink.
///
/// Adapters translate their transport errors into this type so the
/// retention engine never sees HTTP or client specifics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The registry answered with a non-success status.
    #[error("registry rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The registry could not be reached or the connection dropped.
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    /// The registry answered with a body that could not be decoded.
    #[error("malformed registry response: {0}")]
    Malformed(String),
}

/// Result type for version source and sink calls.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Errors that end a pruning run.
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("organization ({organization}) and user ({user}) are mutually exclusive")]
    ConflictingScope { organization: String, user: String },

    #[error("package name must not be empty")]
    MissingPackage,

    #[error("invalid {field} pattern {pattern:?} (regex syntax, no lookaround): {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("listing versions failed on page {page}: {source}")]
    List {
        page: u32,
        #[source]
        source: RegistryError,
    },

    #[error("deleting version {version_id} failed: {source}")]
    Delete {
        version_id: VersionId,
        #[source]
        source: RegistryError,
    },
}

impl PruneError {
    /// Whether the error was raised while validating configuration,
    /// before any registry call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PruneError::ConflictingScope { .. }
                | PruneError::MissingPackage
                | PruneError::InvalidPattern { .. }
        )
    }
}

/// Result type for pruning operations.
pub type Result<T> = std::result::Result<T, PruneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_scope_display() {
        let err = PruneError::ConflictingScope {
            organization: "acme".to_string(),
            user: "octocat".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("acme"));
        assert!(msg.contains("octocat"));
        assert!(msg.contains("mutually exclusive"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_list_error_carries_page() {
        let err = PruneError::List {
            page: 3,
            source: RegistryError::Unavailable("connection reset".to_string()),
        };
        assert!(err.to_string().contains("page 3"));
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_rejected_display() {
        let err = RegistryError::Rejected {
            status: 403,
            message: "Resource not accessible by integration".to_string(),
        };
        assert!(err.to_string().contains("403"));
    }
}
