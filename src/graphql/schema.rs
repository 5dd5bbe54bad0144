//! GraphQL schema definition
//!
//! Queries are open; catalog mutations require an authenticated caller.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::services::{AuthService, CatalogService};

use super::mutations::{AuthMutations, MovieMutations};
use super::queries::{MovieQueries, UserQueries};

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, MovieMutations);

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the services every resolver needs
pub fn build_schema(catalog: CatalogService, auth: AuthService) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(catalog)
    .data(auth)
    .finish()
}
