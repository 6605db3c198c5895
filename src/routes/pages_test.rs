use super::*;
use crate::routes::test_support::{body_text, get, location, post_json, set_cookie};
use crate::state::test_helpers;
use serde_json::json;

const COOKIE: Option<&str> = Some("present");

#[test]
fn escape_handles_markup() {
    assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}

#[test]
fn section_title_uses_first_segment() {
    assert_eq!(section_title("/observability/logs"), "Observability");
    assert_eq!(section_title("/dashboard"), "Dashboard");
    assert_eq!(section_title("/"), "");
}

#[tokio::test]
async fn index_redirects_to_landing() {
    let state = test_helpers::test_app_state();
    let resp = get(&state, "/", None).await;
    assert_eq!(location(&resp), Some("/dashboard"));
}

#[tokio::test]
async fn dashboard_names_identity_and_scope() {
    let state = test_helpers::signed_in_app_state().await;
    let resp = get(&state, "/dashboard", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<h1>Dashboard</h1>"));
    assert!(html.contains("Jacon Admin"));
    assert!(html.contains("Acme Corp / Payments"));
}

#[tokio::test]
async fn page_reflects_org_without_projects() {
    let state = test_helpers::signed_in_app_state().await;
    post_json(&state, "/api/scope/organization", json!({ "id": "org-sandbox" })).await;
    let html = body_text(get(&state, "/workloads", COOKIE).await).await;
    assert!(html.contains("Sandbox Labs / (no project)"));
}

#[tokio::test]
async fn cookie_without_identity_is_sent_to_login_by_the_store() {
    // The guard lets the cookie through; the session store has nobody signed in.
    let state = test_helpers::test_app_state();
    state.session.restore().await;
    let resp = get(&state, "/inventory", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/login"));

    // The stale cookie is expired on the way out.
    let cookie = set_cookie(&resp).expect("expiring cookie").to_owned();
    assert!(cookie.starts_with(&format!("{}=", state.config.session_cookie)));
    assert!(cookie.contains("Max-Age=0"));

    // Without the cookie the sign-in page renders instead of bouncing back.
    let resp = get(&state, "/login", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(location(&resp), None);
}

#[tokio::test]
async fn stale_cookie_after_restart_does_not_loop() {
    // Identity lived only in memory; a fresh state is a restarted server.
    let state = test_helpers::signed_in_app_state().await;
    let restarted = test_helpers::test_app_state();
    restarted.session.restore().await;
    assert!(state.session.identity().await.is_some());

    let resp = get(&restarted, "/dashboard", COOKIE).await;
    assert_eq!(location(&resp), Some("/login"));
    assert!(set_cookie(&resp).is_some_and(|c| c.contains("Max-Age=0")));

    let resp = get(&restarted, "/login", None).await;
    assert!(!resp.status().is_redirection());
}

#[tokio::test]
async fn login_page_form_posts_back_to_login() {
    let state = test_helpers::test_app_state();
    let html = body_text(get(&state, "/login", None).await).await;
    assert!(html.contains(r#"<form method="post" action="/login">"#));
    assert!(html.contains(r#"name="email""#));
    assert!(html.contains(r#"name="password""#));
}

#[tokio::test]
async fn config_detail_renders_known_entry() {
    let state = test_helpers::signed_in_app_state().await;
    let resp = get(&state, "/config/cfg-pay-env", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("payments-env"));
    assert!(html.contains("LOG_LEVEL"));
}

#[tokio::test]
async fn unknown_config_renders_inline_not_found_with_back_link() {
    let state = test_helpers::signed_in_app_state().await;
    let resp = get(&state, "/config/cfg-missing", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("Config not found"));
    assert!(html.contains("cfg-missing"));
    assert!(html.contains(r#"<a href="/config">"#));
}

#[tokio::test]
async fn unknown_stack_renders_inline_not_found_with_back_link() {
    let state = test_helpers::signed_in_app_state().await;
    let resp = get(&state, "/deploy/%3Cscript%3E", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("Stack not found"));
    assert!(html.contains(r#"<a href="/deploy">"#));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn listings_are_scoped_to_current_project() {
    let state = test_helpers::signed_in_app_state().await;
    let html = body_text(get(&state, "/deploy", COOKIE).await).await;
    assert!(html.contains("/deploy/stk-pay"));
    assert!(!html.contains("/deploy/stk-shop"));

    let html = body_text(get(&state, "/config", COOKIE).await).await;
    assert!(html.contains("/config/cfg-pay-db"));
    assert!(!html.contains("/config/cfg-tls"));
}

#[tokio::test]
async fn protected_subpath_with_cookie_falls_through_to_not_found() {
    let state = test_helpers::signed_in_app_state().await;
    let resp = get(&state, "/dashboard/nowhere", COOKIE).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
