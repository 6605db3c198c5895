//! Tenancy scope routes: organization list and current selection.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::error::ConsoleError;
use crate::services::tenancy::{Organization, ScopeView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SelectRequest {
    id: String,
}

/// `GET /api/orgs`: every organization with its projects.
pub async fn list_organizations(State(state): State<AppState>) -> Json<Vec<Organization>> {
    Json(state.scope.read().await.organizations().to_vec())
}

/// `GET /api/scope`: current organization and project.
pub async fn current_scope(State(state): State<AppState>) -> Json<ScopeView> {
    Json(state.scope.read().await.view())
}

/// `POST /api/scope/organization`: switch organization, auto-selecting its first project.
pub async fn select_organization(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<ScopeView>, ConsoleError> {
    let view = state.scope.write().await.select_organization_by_id(&body.id)?;
    Ok(Json(view))
}

/// `POST /api/scope/project`: switch project without touching the organization.
pub async fn select_project(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<ScopeView>, ConsoleError> {
    let view = state.scope.write().await.select_project_by_id(&body.id)?;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{body_json, get, post_json};
    use crate::state::test_helpers;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn lists_every_organization() {
        let state = test_helpers::test_app_state();
        let body = body_json(get(&state, "/api/orgs", None).await).await;
        assert_eq!(body.as_array().map(Vec::len), Some(state.catalog.organizations.len()));
    }

    #[tokio::test]
    async fn switching_org_selects_its_first_project() {
        let state = test_helpers::test_app_state();
        let resp = post_json(&state, "/api/scope/organization", json!({ "id": "org-globex" })).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["organization"]["id"], "org-globex");
        assert_eq!(body["project"]["id"], "prj-research");

        let current = body_json(get(&state, "/api/scope", None).await).await;
        assert_eq!(current["project"]["id"], "prj-research");
    }

    #[tokio::test]
    async fn switching_to_org_without_projects_clears_project() {
        let state = test_helpers::test_app_state();
        let body = body_json(post_json(&state, "/api/scope/organization", json!({ "id": "org-sandbox" })).await).await;
        assert!(body["project"].is_null());
    }

    #[tokio::test]
    async fn selecting_a_project_keeps_the_organization() {
        let state = test_helpers::test_app_state();
        let body = body_json(post_json(&state, "/api/scope/project", json!({ "id": "prj-analytics" })).await).await;
        assert_eq!(body["organization"]["id"], "org-acme");
        assert_eq!(body["project"]["id"], "prj-analytics");
    }

    #[tokio::test]
    async fn unknown_ids_are_404() {
        let state = test_helpers::test_app_state();
        let resp = post_json(&state, "/api/scope/organization", json!({ "id": "org-nope" })).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = post_json(&state, "/api/scope/project", json!({ "id": "prj-nope" })).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
