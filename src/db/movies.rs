//! Movie database repository
//!
//! List queries are built from a validated filter/sort value, never from
//! raw caller strings; the sort column interpolated into SQL can only come
//! from [`MovieSortField::column`].

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Movie record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub director: String,
    pub release_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a movie
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub name: String,
    pub description: String,
    pub director: String,
    pub release_date: NaiveDate,
}

/// Input for updating a movie; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateMovie {
    pub name: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
}

/// Substring filters for list queries; fields combine with AND, an absent
/// field imposes no constraint. Matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct MovieFilters {
    pub name: Option<String>,
    pub director: Option<String>,
    pub description: Option<String>,
}

/// Sortable columns, the full allow-list for caller-supplied sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    Id,
    Name,
    Director,
    Description,
    ReleaseDate,
}

impl MovieSortField {
    /// Parse an API-level field name; anything outside the allow-list is `None`
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "id" => Some(MovieSortField::Id),
            "name" => Some(MovieSortField::Name),
            "director" => Some(MovieSortField::Director),
            "description" => Some(MovieSortField::Description),
            "releaseDate" => Some(MovieSortField::ReleaseDate),
            _ => None,
        }
    }

    /// Database column name
    pub fn column(self) -> &'static str {
        match self {
            MovieSortField::Id => "id",
            MovieSortField::Name => "name",
            MovieSortField::Director => "director",
            MovieSortField::Description => "description",
            MovieSortField::ReleaseDate => "release_date",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an API-level order, case-insensitively
    pub fn parse(order: &str) -> Option<Self> {
        if order.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if order.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    /// Convert to SQL order string
    pub fn to_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A validated sort specification
#[derive(Debug, Clone, Copy)]
pub struct MovieSort {
    pub field: MovieSortField,
    pub order: SortOrder,
}

/// Storage seam for movie records, implemented by [`MovieRepository`] and by
/// in-memory doubles in tests.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetch one page of movies plus the total count matching the same
    /// filters (unpaginated).
    async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
        filters: &MovieFilters,
        sort: Option<MovieSort>,
    ) -> Result<(Vec<MovieRecord>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<MovieRecord>>;

    /// Case-insensitive exact-name lookup, used for the create-time
    /// duplicate check.
    async fn get_by_name_ci(&self, name: &str) -> Result<Option<MovieRecord>>;

    async fn create(&self, input: CreateMovie) -> Result<MovieRecord>;

    async fn update(&self, id: Uuid, input: UpdateMovie) -> Result<Option<MovieRecord>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for MovieRepository {
    async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
        filters: &MovieFilters,
        sort: Option<MovieSort>,
    ) -> Result<(Vec<MovieRecord>, i64)> {
        // Build dynamic WHERE clause conditions
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx = 1;

        if filters.name.is_some() {
            conditions.push(format!("LOWER(name) LIKE ${}", param_idx));
            param_idx += 1;
        }
        if filters.director.is_some() {
            conditions.push(format!("LOWER(director) LIKE ${}", param_idx));
            param_idx += 1;
        }
        if filters.description.is_some() {
            conditions.push(format!("LOWER(description) LIKE ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            "TRUE".to_string()
        } else {
            conditions.join(" AND ")
        };

        let order_clause = match sort {
            Some(s) => format!("ORDER BY {} {}", s.field.column(), s.order.to_sql()),
            None => "ORDER BY name ASC".to_string(),
        };

        let count_query = format!("SELECT COUNT(*) FROM movies WHERE {}", where_clause);

        let data_query = format!(
            r#"
            SELECT id, name, description, director, release_date, created_at, updated_at
            FROM movies
            WHERE {}
            {}
            LIMIT {} OFFSET {}
            "#,
            where_clause, order_clause, limit, offset
        );

        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(name) = &filters.name {
            count_builder = count_builder.bind(format!("%{}%", name.to_lowercase()));
        }
        if let Some(director) = &filters.director {
            count_builder = count_builder.bind(format!("%{}%", director.to_lowercase()));
        }
        if let Some(description) = &filters.description {
            count_builder = count_builder.bind(format!("%{}%", description.to_lowercase()));
        }
        let total: i64 = count_builder.fetch_one(&self.pool).await?;

        let mut data_builder = sqlx::query_as::<_, MovieRecord>(&data_query);
        if let Some(name) = &filters.name {
            data_builder = data_builder.bind(format!("%{}%", name.to_lowercase()));
        }
        if let Some(director) = &filters.director {
            data_builder = data_builder.bind(format!("%{}%", director.to_lowercase()));
        }
        if let Some(description) = &filters.description {
            data_builder = data_builder.bind(format!("%{}%", description.to_lowercase()));
        }
        let records = data_builder.fetch_all(&self.pool).await?;

        Ok((records, total))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            SELECT id, name, description, director, release_date, created_at, updated_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_by_name_ci(&self, name: &str) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            SELECT id, name, description, director, release_date, created_at, updated_at
            FROM movies
            WHERE LOWER(name) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn create(&self, input: CreateMovie) -> Result<MovieRecord> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            INSERT INTO movies (name, description, director, release_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, director, release_date, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.director)
        .bind(input.release_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, id: Uuid, input: UpdateMovie) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            UPDATE movies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                director = COALESCE($4, director),
                release_date = COALESCE($5, release_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, director, release_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.director)
        .bind(input.release_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
