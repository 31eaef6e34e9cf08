pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;

use axum::{
    Router,
    extract::Request,
    middleware::{self as axum_middleware, Next},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::utils::app_config::AppConfig;
use config::ApiConfig;
use handlers::{
    budget::{create_budget, get_budget},
    health::health,
    info::api_info,
    users::{get_users, login, signup},
};
use middleware::auth::require_admin_token;

/// Build the HTTP surface over an initialized store.
pub fn router(app_config: AppConfig, api_config: &ApiConfig) -> Router {
    let mut users_routes = Router::new().route("/users", get(get_users));

    if let Some(token) = api_config.admin_token.clone() {
        users_routes = users_routes.route_layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            require_admin_token(token.clone(), req, next)
        }));
    }

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/info", get(api_info))
        .route("/budget", get(get_budget).post(create_budget))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(users_routes)
        .with_state(app_config);

    if let Some(dir) = &api_config.static_dir {
        if dir.is_dir() {
            tracing::info!("Serving static files from {}", dir.display());
            router = router.fallback_service(ServeDir::new(dir));
        } else {
            tracing::warn!("STATIC_DIR {} is not a directory, static files disabled", dir.display());
        }
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
