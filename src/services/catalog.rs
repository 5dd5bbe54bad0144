//! Catalog service: query construction and mutation rules for movies
//!
//! Turns optional pagination, filter, and sort arguments into a validated
//! storage query and assembles the paginated result envelope. All caller
//! input is checked here, before any store call; the store only ever sees
//! validated values.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::{
    CreateMovie, MovieFilters, MovieRecord, MovieSort, MovieSortField, MovieStore, SortOrder,
    UpdateMovie,
};
use crate::error::ApiError;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

/// List request as it arrives from the API: pagination and sort are raw
/// caller values, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct MovieListRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub filters: MovieFilters,
    pub sort: Option<SortRequest>,
}

/// Caller-supplied sort: a field name plus "asc"/"desc"
#[derive(Debug, Clone)]
pub struct SortRequest {
    pub field: String,
    pub order: String,
}

/// Input for creating a movie; the release date is still an unparsed string
#[derive(Debug, Clone)]
pub struct CreateMovieRequest {
    pub name: String,
    pub description: String,
    pub director: String,
    pub release_date: String,
}

/// Input for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<String>,
}

/// One page of movies plus count metadata, recomputed every call
#[derive(Debug, Clone)]
pub struct MoviePageData {
    pub items: Vec<MovieRecord>,
    pub total_count: i64,
    pub total_pages: i64,
    pub page: i64,
}

/// Catalog service over a movie store
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn MovieStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// List movies with pagination, filtering, and sorting.
    ///
    /// `page` is 1-indexed and defaults to 1; `page_size` defaults to 10 and
    /// has no upper bound, so callers can request arbitrarily large pages.
    pub async fn list_movies(&self, req: MovieListRequest) -> Result<MoviePageData, ApiError> {
        let page = req.page.unwrap_or(DEFAULT_PAGE);
        let page_size = req.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        // A page below 1 would send a negative offset to the store, and a
        // page size below 1 leaves the page count undefined.
        if page < 1 {
            return Err(ApiError::Validation(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if page_size < 1 {
            return Err(ApiError::Validation(format!(
                "pageSize must be at least 1, got {}",
                page_size
            )));
        }

        let sort = req.sort.as_ref().map(parse_sort).transpose()?;

        let offset = (page - 1) * page_size;
        let (items, total_count) = self
            .store
            .list_paginated(offset, page_size, &req.filters, sort)
            .await?;

        Ok(MoviePageData {
            items,
            total_count,
            total_pages: (total_count + page_size - 1) / page_size,
            page,
        })
    }

    /// Fetch a single movie; a missing id is an error, not a null success
    pub async fn get_movie(&self, id: Uuid) -> Result<MovieRecord, ApiError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("movie"))
    }

    /// Create a movie after checking the date parses and the name is free
    pub async fn create_movie(&self, req: CreateMovieRequest) -> Result<MovieRecord, ApiError> {
        let release_date = parse_release_date(&req.release_date)?;

        if let Some(existing) = self.store.get_by_name_ci(&req.name).await? {
            return Err(ApiError::Conflict(format!(
                "a movie named '{}' already exists",
                existing.name
            )));
        }

        let movie = self
            .store
            .create(CreateMovie {
                name: req.name,
                description: req.description,
                director: req.director,
                release_date,
            })
            .await?;

        tracing::info!(movie_id = %movie.id, name = %movie.name, "movie created");

        Ok(movie)
    }

    /// Partially update a movie; unspecified fields stay unchanged
    pub async fn update_movie(
        &self,
        id: Uuid,
        req: UpdateMovieRequest,
    ) -> Result<MovieRecord, ApiError> {
        let release_date = req
            .release_date
            .as_deref()
            .map(parse_release_date)
            .transpose()?;

        if self.store.get_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound("movie"));
        }

        let updated = self
            .store
            .update(
                id,
                UpdateMovie {
                    name: req.name,
                    description: req.description,
                    director: req.director,
                    release_date,
                },
            )
            .await?
            .ok_or(ApiError::NotFound("movie"))?;

        tracing::info!(movie_id = %updated.id, "movie updated");

        Ok(updated)
    }

    /// Delete a movie and return the deleted record
    pub async fn delete_movie(&self, id: Uuid) -> Result<MovieRecord, ApiError> {
        let movie = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("movie"))?;

        if !self.store.delete(id).await? {
            // Raced with a concurrent delete
            return Err(ApiError::NotFound("movie"));
        }

        tracing::info!(movie_id = %movie.id, name = %movie.name, "movie deleted");

        Ok(movie)
    }
}

/// Validate a caller-supplied sort against the field allow-list
fn parse_sort(req: &SortRequest) -> Result<MovieSort, ApiError> {
    let field = MovieSortField::parse(&req.field).ok_or_else(|| {
        ApiError::Validation(format!(
            "unknown sort field '{}' (expected one of id, name, director, description, releaseDate)",
            req.field
        ))
    })?;

    let order = SortOrder::parse(&req.order).ok_or_else(|| {
        ApiError::Validation(format!(
            "unknown sort order '{}' (expected asc or desc)",
            req.order
        ))
    })?;

    Ok(MovieSort { field, order })
}

/// Parse a calendar date in YYYY-MM-DD form
fn parse_release_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!(
            "releaseDate '{}' is not a valid calendar date (expected YYYY-MM-DD)",
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_sort_accepts_allow_list() {
        let sort = parse_sort(&SortRequest {
            field: "releaseDate".to_string(),
            order: "DESC".to_string(),
        })
        .unwrap();
        assert_eq!(sort.field, MovieSortField::ReleaseDate);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_parse_sort_rejects_unknown_field() {
        let err = parse_sort(&SortRequest {
            field: "rating".to_string(),
            order: "asc".to_string(),
        })
        .unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
    }

    #[test]
    fn test_parse_sort_rejects_unknown_order() {
        let err = parse_sort(&SortRequest {
            field: "name".to_string(),
            order: "sideways".to_string(),
        })
        .unwrap_err();
        assert_matches!(err, ApiError::Validation(_));
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2020-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert_matches!(
            parse_release_date("2020-13-01").unwrap_err(),
            ApiError::Validation(_)
        );
        assert_matches!(
            parse_release_date("yesterday").unwrap_err(),
            ApiError::Validation(_)
        );
        // A date-time is not a calendar date
        assert_matches!(
            parse_release_date("2020-01-01T00:00:00Z").unwrap_err(),
            ApiError::Validation(_)
        );
    }
}
