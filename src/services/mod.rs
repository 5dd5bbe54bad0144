//! Domain services: authentication and the movie catalog

pub mod auth;
pub mod catalog;

pub use auth::{AuthConfig, AuthPayload, AuthService, AuthUser, SignUpInput};
pub use catalog::{
    CatalogService, CreateMovieRequest, MovieListRequest, MoviePageData, SortRequest,
    UpdateMovieRequest,
};
