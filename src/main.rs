//! Cinevault - GraphQL movie catalog service
//!
//! This is the main entry point. All operations are exposed via GraphQL
//! at /graphql; caller identity travels as a bearer token in the
//! Authorization header and is resolved into request data here, before
//! schema execution.

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinevault::config::Config;
use cinevault::db::{Database, MovieStore, UserStore};
use cinevault::graphql::{CatalogSchema, build_schema};
use cinevault::services::{AuthConfig, AuthService, CatalogService};

/// Application state shared across all handlers
#[derive(Clone)]
struct AppState {
    schema: CatalogSchema,
    auth: AuthService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinevault=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cinevault");

    // The storage gateway is constructed once here and passed down; each
    // service owns a handle rather than reaching for a global client.
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    tracing::info!("Database connected and migrated");

    let users: Arc<dyn UserStore> = Arc::new(db.users());
    let movies: Arc<dyn MovieStore> = Arc::new(db.movies());

    let auth = AuthService::new(
        users,
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime: config.token_lifetime,
            bcrypt_cost: config.bcrypt_cost,
        },
    );
    let catalog = CatalogService::new(movies);

    let schema = build_schema(catalog, auth.clone());
    tracing::info!("GraphQL schema built");

    let state = AppState { schema, auth };

    let app = Router::new()
        .route("/health", get(health))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Extract bearer token from Authorization header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| h.starts_with("Bearer "))
        .map(|h| h[7..].to_string())
}

/// GraphQL query/mutation handler with auth context
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    // Resolve the caller identity up front; any failure degrades to an
    // anonymous request rather than an error.
    let token = extract_token(&headers);
    if let Some(user) = state.auth.resolve_context(token.as_deref()).await {
        request = request.data(user);
    }

    state.schema.execute(request).await.into()
}

/// Liveness endpoint
async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
            .into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_token(&headers), Some("abc.def.ghi".to_string()));

        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(extract_token(&headers), None);
    }
}
