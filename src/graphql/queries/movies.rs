use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// List movies with pagination, filtering, and sorting
    async fn movies(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
        filters: Option<MovieFiltersInput>,
        sort_by: Option<MovieSortInput>,
    ) -> Result<MoviePage> {
        let catalog = ctx.data_unchecked::<CatalogService>();

        let result = catalog
            .list_movies(MovieListRequest {
                page: page.map(i64::from),
                page_size: page_size.map(i64::from),
                filters: filters.map(Into::into).unwrap_or_default(),
                sort: sort_by.map(Into::into),
            })
            .await?;

        Ok(MoviePage {
            items: result
                .items
                .into_iter()
                .map(movie_record_to_graphql)
                .collect(),
            total_count: result.total_count,
            total_pages: result.total_pages,
            page: result.page,
        })
    }

    /// Get a specific movie by ID
    async fn movie(&self, ctx: &Context<'_>, id: String) -> Result<Movie> {
        let catalog = ctx.data_unchecked::<CatalogService>();
        let movie_id = Uuid::parse_str(&id)
            .map_err(|e| ApiError::Validation(format!("invalid movie id: {}", e)))?;

        let record = catalog.get_movie(movie_id).await?;
        Ok(movie_record_to_graphql(record))
    }
}
