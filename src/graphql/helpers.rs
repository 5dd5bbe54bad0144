// Helper functions shared across GraphQL query/mutation modules.

use crate::db::{MovieRecord, UserRecord};
use crate::graphql::types::{Movie, User};

/// Convert a MovieRecord from the database to a GraphQL Movie type
pub(crate) fn movie_record_to_graphql(r: MovieRecord) -> Movie {
    Movie {
        id: r.id.to_string(),
        movie_name: r.name,
        description: r.description,
        director: r.director,
        release_date: r.release_date.to_string(),
    }
}

/// Convert a UserRecord to a GraphQL User type, dropping the password hash
pub(crate) fn user_record_to_graphql(r: UserRecord) -> User {
    User {
        id: r.id.to_string(),
        user_name: r.user_name,
        email: r.email,
    }
}
