//! GraphQL movie mutations
//!
//! Every mutation here checks the caller identity before anything else;
//! an anonymous caller is rejected without learning whether the target
//! id exists and without any storage call.

use super::prelude::*;

#[derive(Default)]
pub struct MovieMutations;

#[Object]
impl MovieMutations {
    /// Add a movie to the catalog
    async fn create_movie(
        &self,
        ctx: &Context<'_>,
        movie_name: String,
        description: String,
        director: String,
        release_date: String,
    ) -> Result<Movie> {
        let user = ctx.auth_user()?;
        let catalog = ctx.data_unchecked::<CatalogService>();

        let record = catalog
            .create_movie(CreateMovieRequest {
                name: movie_name,
                description,
                director,
                release_date,
            })
            .await
            .inspect_err(|e| tracing::warn!(user_id = %user.id, error = %e, "create movie failed"))?;

        Ok(movie_record_to_graphql(record))
    }

    /// Update a movie; absent fields are left unchanged
    async fn update_movie(
        &self,
        ctx: &Context<'_>,
        id: String,
        movie_name: Option<String>,
        description: Option<String>,
        director: Option<String>,
        release_date: Option<String>,
    ) -> Result<Movie> {
        let user = ctx.auth_user()?;
        let catalog = ctx.data_unchecked::<CatalogService>();
        let movie_id = Uuid::parse_str(&id)
            .map_err(|e| ApiError::Validation(format!("invalid movie id: {}", e)))?;

        let record = catalog
            .update_movie(
                movie_id,
                UpdateMovieRequest {
                    name: movie_name,
                    description,
                    director,
                    release_date,
                },
            )
            .await
            .inspect_err(|e| tracing::warn!(user_id = %user.id, movie_id = %movie_id, error = %e, "update movie failed"))?;

        Ok(movie_record_to_graphql(record))
    }

    /// Delete a movie and return the deleted record
    async fn delete_movie(&self, ctx: &Context<'_>, id: String) -> Result<Movie> {
        let user = ctx.auth_user()?;
        let catalog = ctx.data_unchecked::<CatalogService>();
        let movie_id = Uuid::parse_str(&id)
            .map_err(|e| ApiError::Validation(format!("invalid movie id: {}", e)))?;

        let record = catalog
            .delete_movie(movie_id)
            .await
            .inspect_err(|e| tracing::warn!(user_id = %user.id, movie_id = %movie_id, error = %e, "delete movie failed"))?;

        Ok(movie_record_to_graphql(record))
    }
}
