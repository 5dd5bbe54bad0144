//! API error taxonomy
//!
//! Every failure surfaced to a caller falls into one of these variants.
//! At the GraphQL boundary each converts into a field-level error carrying
//! a machine-readable `code` extension.

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Domain errors for the catalog and user services
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad caller input: unknown sort field/order, invalid date, zero page size
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired caller identity on a mutation
    #[error("authentication required")]
    Unauthorized,

    /// The requested entity id does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation would collide with existing state
    #[error("{0}")]
    Conflict(String),

    /// Login or password change with credentials that do not match
    #[error("invalid credentials")]
    CredentialMismatch,

    /// Storage or crypto backend failure; details stay in the logs
    #[error("storage backend failure")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// Machine-readable error code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::CredentialMismatch => "CREDENTIAL_MISMATCH",
            ApiError::Upstream(_) => "UPSTREAM",
        }
    }
}

impl From<ApiError> for async_graphql::Error {
    fn from(err: ApiError) -> Self {
        if let ApiError::Upstream(source) = &err {
            tracing::error!(error = %source, "upstream failure surfaced to caller");
        }
        let code = err.code();
        async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
