pub mod auth;
pub mod movies;

pub use auth::AuthMutations;
pub use movies::MovieMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};
    pub(crate) use uuid::Uuid;

    pub(crate) use crate::error::ApiError;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{
        AuthService, CatalogService, CreateMovieRequest, SignUpInput, UpdateMovieRequest,
    };
}
