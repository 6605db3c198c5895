//! Read-only console API over the mock catalog and live feeds.
//!
//! Resource lists are filtered to the current project. The filter is
//! cosmetic: any caller can change the scope and see everything.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::auth::SignedIn;
use crate::services::audit::{self, AuditLogEntry, AuditQuery};
use crate::services::catalog::{Cluster, ConfigEntry, Endpoint, Stack, Workload};
use crate::services::feeds::{ActivityEvent, LogLine};
use crate::services::policy::{self, PolicyDecision, PolicyRequest};
use crate::services::tenancy::ScopeView;
use crate::state::AppState;

const DEFAULT_LOG_TAIL: usize = 100;

/// A scoped collection together with the scope it was filtered by.
#[derive(Serialize)]
pub struct Scoped<T> {
    pub scope: ScopeView,
    pub items: Vec<T>,
}

async fn scoped<T, F>(state: &AppState, rows: &[T], project_of: F) -> Json<Scoped<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let scope = state.scope.read().await;
    let items = rows.iter().filter(|&r| scope.includes(project_of(r))).cloned().collect();
    Json(Scoped { scope: scope.view(), items })
}

/// `GET /api/clusters`
pub async fn list_clusters(State(state): State<AppState>) -> Json<Scoped<Cluster>> {
    scoped(&state, &state.catalog.clusters, |c| c.project_id.as_str()).await
}

/// `GET /api/workloads`
pub async fn list_workloads(State(state): State<AppState>) -> Json<Scoped<Workload>> {
    scoped(&state, &state.catalog.workloads, |w| w.project_id.as_str()).await
}

/// `GET /api/endpoints`
pub async fn list_endpoints(State(state): State<AppState>) -> Json<Scoped<Endpoint>> {
    scoped(&state, &state.catalog.endpoints, |e| e.project_id.as_str()).await
}

/// `GET /api/configs`
pub async fn list_configs(State(state): State<AppState>) -> Json<Scoped<ConfigEntry>> {
    scoped(&state, &state.catalog.configs, |c| c.project_id.as_str()).await
}

/// `GET /api/stacks`
pub async fn list_stacks(State(state): State<AppState>) -> Json<Scoped<Stack>> {
    scoped(&state, &state.catalog.stacks, |s| s.project_id.as_str()).await
}

/// `GET /api/audit?q=&severity=`: substring-filtered audit rows.
pub async fn list_audit(State(state): State<AppState>, Query(query): Query<AuditQuery>) -> Json<Vec<AuditLogEntry>> {
    let rows = audit::filter_entries(&state.catalog.audit_log, &query)
        .into_iter()
        .cloned()
        .collect();
    Json(rows)
}

/// `GET /api/activity`: latest activity snapshot.
pub async fn activity(State(state): State<AppState>) -> Json<Vec<ActivityEvent>> {
    Json(state.activity.snapshot().await)
}

#[derive(Deserialize)]
pub struct LogQuery {
    source: Option<String>,
    limit: Option<usize>,
}

/// `GET /api/logs?source=&limit=`: most recent synthetic log lines.
pub async fn logs(State(state): State<AppState>, Query(query): Query<LogQuery>) -> Json<Vec<LogLine>> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_TAIL).min(state.logs.capacity());
    Json(state.logs.tail(query.source.as_deref(), limit).await)
}

/// `POST /api/policy/check`: mock IAM evaluation for the signed-in identity.
pub async fn check_policy(
    State(state): State<AppState>,
    auth: SignedIn,
    Json(request): Json<PolicyRequest>,
) -> Json<PolicyDecision> {
    let decision = policy::check_policy(&state.catalog, &auth.user, &request, state.config.mock_delay).await;
    Json(decision)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
