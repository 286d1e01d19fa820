use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use betengine_core::error::endpoint_not_found;
use betengine_core::health::health;
use betengine_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{
        approve_user, impersonate_user, list_users, reject_user, set_user_link,
        update_user_metrics,
    },
    auth::{login, register},
    metrics::{get_own_metrics, update_own_metrics},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Health
        .route("/health", get(health))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Own metrics
        .route("/user/metrics", get(get_own_metrics).post(update_own_metrics))
        // Admin directory
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/approve", post(approve_user))
        .route("/admin/users/{id}/reject", post(reject_user))
        .route("/admin/users/{id}/link", post(set_user_link))
        .route("/admin/users/{id}/metrics", post(update_user_metrics))
        .route("/admin/impersonate/{id}", post(impersonate_user))
        .fallback(endpoint_not_found);

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
