//! GraphQL API surface
//!
//! Declares the queryable schema and wires each field to the authorization
//! check and the catalog/auth services. This is the single API surface of
//! the service.

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::AuthExt;
pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema};
