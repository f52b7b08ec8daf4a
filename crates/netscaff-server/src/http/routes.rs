//! API route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Routes every deployment serves.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/project/scaffold-download",
            post(handlers::project::scaffold_download),
        )
        .route("/api/project/validate", post(handlers::project::validate))
        .route("/api/dotnet/status", get(handlers::dotnet::status))
}

fn dev_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dev/entity", post(handlers::dev::entity))
        .route("/api/dev/command", post(handlers::dev::command))
        .route("/api/dev/handler", post(handlers::dev::handler))
        .route("/api/dev/repository", post(handlers::dev::repository))
        .route("/api/dev/scaffold", post(handlers::dev::scaffold))
}

/// The complete application; development routes are mounted only when
/// `server.dev_endpoints` is on.
pub fn router(state: AppState) -> Router {
    let mut routes = api_routes();
    if state.config.server.dev_endpoints {
        routes = routes.merge(dev_routes());
    }

    routes
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
