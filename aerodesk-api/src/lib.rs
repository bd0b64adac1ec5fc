use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airlines;
pub mod auth;
pub mod error;
pub mod extract;
pub mod flights;
pub mod middleware;
pub mod state;

pub use state::{AppState, AuthConfig};

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(auth::routes())
        .merge(airlines::routes())
        .merge(flights::routes())
        .fallback(error::no_route)
        .layer(axum::middleware::from_fn(error::describe_errors))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
