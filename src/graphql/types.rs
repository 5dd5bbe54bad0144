//! GraphQL object and input types

use async_graphql::{InputObject, SimpleObject};

use crate::db::MovieFilters;
use crate::services::SortRequest;

/// A registered user. The password hash is deliberately absent.
#[derive(SimpleObject, Debug, Clone)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

/// A movie in the catalog
#[derive(SimpleObject, Debug, Clone)]
pub struct Movie {
    pub id: String,
    pub movie_name: String,
    pub description: String,
    pub director: String,
    /// Release date as a calendar date, YYYY-MM-DD
    pub release_date: String,
}

/// Token and user returned by signUp and login
#[derive(SimpleObject, Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// One page of movies plus count metadata
#[derive(SimpleObject, Debug, Clone)]
pub struct MoviePage {
    /// Items for the current page
    pub items: Vec<Movie>,
    /// Total matching count, unpaginated
    pub total_count: i64,
    /// Ceiling of totalCount / pageSize
    pub total_pages: i64,
    /// Current page number, 1-indexed
    pub page: i64,
}

/// Substring filters; fields combine with AND, matching is case-insensitive
#[derive(InputObject, Debug, Clone, Default)]
pub struct MovieFiltersInput {
    pub movie_name: Option<String>,
    pub director: Option<String>,
    pub description: Option<String>,
}

impl From<MovieFiltersInput> for MovieFilters {
    fn from(input: MovieFiltersInput) -> Self {
        MovieFilters {
            name: input.movie_name,
            director: input.director,
            description: input.description,
        }
    }
}

/// Sort specification: a field from the allow-list (id, name, director,
/// description, releaseDate) plus "asc"/"desc"
#[derive(InputObject, Debug, Clone)]
pub struct MovieSortInput {
    pub field: String,
    pub order: String,
}

impl From<MovieSortInput> for SortRequest {
    fn from(input: MovieSortInput) -> Self {
        SortRequest {
            field: input.field,
            order: input.order,
        }
    }
}
