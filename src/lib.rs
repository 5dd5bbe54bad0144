//! Cinevault - GraphQL movie catalog service
//!
//! A small GraphQL API over two entities (users, movies) backed by
//! PostgreSQL. Users sign up, log in, and change passwords; the movie
//! catalog supports listing with filtering/sorting/pagination plus
//! create/update/delete gated on an authenticated caller.

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod services;
