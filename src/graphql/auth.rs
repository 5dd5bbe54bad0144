//! GraphQL authorization check
//!
//! The caller identity is resolved once per request in the HTTP handler
//! (token verification plus user lookup) and inserted into request data.
//! Mutations gate on its presence via `AuthExt` before touching storage.

use async_graphql::{Context, Result};

use crate::error::ApiError;
use crate::services::AuthUser;

/// Extension trait to get the authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or fail with Unauthorized
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present, or None
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>()
            .ok_or_else(|| ApiError::Unauthorized.into())
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}
