use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        // Dashboard
        .route("/api/dashboard", get(handlers::dashboard::summary))
        .route("/api/dashboard/summary", get(handlers::dashboard::summary))
        // Reference data
        .route("/api/customers", get(handlers::customers::list))
        .route("/api/accounts", get(handlers::customers::accounts))
        // Transactional data
        .route("/api/trades", get(handlers::trades::list))
        .route("/api/corporate-actions", get(handlers::corporate_actions::list))
        .route("/api/corporate_actions", get(handlers::corporate_actions::list))
        // Time series
        .route("/api/assets-under-custody", get(handlers::history::assets_under_custody))
        .route("/api/trades-by-asset", get(handlers::history::trades_by_asset))
        // Notifications
        .route("/api/notifications", get(handlers::notifications::list))
        .route("/api/notifications/read/all", put(handlers::notifications::mark_all_read))
        .route("/api/notifications/read-all", put(handlers::notifications::mark_all_read))
        .route("/api/notifications/:id/read", put(handlers::notifications::mark_read));

    let ops = Router::new().route("/metrics", get(handlers::metrics::render));

    // The front door serves the dashboard from the same origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api.merge(ops)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
