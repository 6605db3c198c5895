//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the console pages and the JSON API. The route
//! guard wraps every route, including the fallback, so sub-paths of a
//! protected prefix redirect before they 404.

pub mod api;
pub mod auth;
pub mod guard;
pub mod pages;
pub mod scope;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full console router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(auth::login_form))
        .route("/dashboard", get(pages::section))
        .route("/admin", get(pages::section))
        .route("/inventory", get(pages::section))
        .route("/workloads", get(pages::section))
        .route("/policy", get(pages::section))
        .route("/observability", get(pages::section))
        .route("/endpoints", get(pages::section))
        .route("/config", get(pages::config_list))
        .route("/config/{id}", get(pages::config_detail))
        .route("/deploy", get(pages::stack_list))
        .route("/deploy/{id}", get(pages::stack_detail))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/status", get(auth::status))
        .route("/api/orgs", get(scope::list_organizations))
        .route("/api/scope", get(scope::current_scope))
        .route("/api/scope/organization", post(scope::select_organization))
        .route("/api/scope/project", post(scope::select_project))
        .route("/api/clusters", get(api::list_clusters))
        .route("/api/workloads", get(api::list_workloads))
        .route("/api/endpoints", get(api::list_endpoints))
        .route("/api/configs", get(api::list_configs))
        .route("/api/stacks", get(api::list_stacks))
        .route("/api/audit", get(api::list_audit))
        .route("/api/activity", get(api::activity))
        .route("/api/logs", get(api::logs))
        .route("/api/policy/check", post(api::check_policy))
        .route("/healthz", get(healthz))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), guard::insecure_demo_guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST SUPPORT
// =============================================================================
