pub mod movies;
pub mod users;

pub use movies::MovieQueries;
pub use users::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};
    pub(crate) use uuid::Uuid;

    pub(crate) use crate::error::ApiError;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{AuthService, CatalogService, MovieListRequest};
}
