//! Console page shells.
//!
//! Pages are deliberately bare HTML: they name the signed-in identity and
//! the current scope so the gating and tenancy behavior is visible in a
//! browser. Unknown config or stack ids render an inline not-found view
//! with a link back to the listing rather than an error.

use std::fmt::Write;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::paths;
use crate::routes::auth::SignedIn;
use crate::services::tenancy::ScopeView;
use crate::state::AppState;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{} | Jacon</title></head>\n<body>\n{body}\n</body></html>\n",
        escape(title)
    )
}

fn header(auth: &SignedIn, scope: &ScopeView) -> String {
    let project = scope.project.as_ref().map_or("(no project)", |p| p.name.as_str());
    format!(
        "<header><strong>Jacon</strong> &middot; {} / {} &middot; {} ({})</header>",
        escape(&scope.organization.name),
        escape(project),
        escape(&auth.user.name),
        escape(&auth.user.role),
    )
}

fn section_title(path: &str) -> String {
    let name = path.trim_matches('/').split('/').next().unwrap_or_default();
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn not_found_view(kind: &str, id: &str, back_href: &str, back_label: &str) -> Response {
    let body = format!(
        "<h1>{} not found</h1>\n<p>No {} with id <code>{}</code> exists.</p>\n<a href=\"{back_href}\">Back to {back_label}</a>",
        escape(kind),
        escape(&kind.to_lowercase()),
        escape(id),
    );
    (StatusCode::NOT_FOUND, Html(layout(&format!("{kind} not found"), &body))).into_response()
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::temporary(paths::LANDING_PATH)
}

/// Sign-in form, optionally with an error line above it.
pub(crate) fn login_form_html(error: Option<&str>) -> Html<String> {
    let notice = error.map(|e| format!("<p role=\"alert\">{}</p>\n", escape(e))).unwrap_or_default();
    let body = format!(
        "<h1>Sign in</h1>\n{notice}\
        <form method=\"post\" action=\"{action}\">\n\
        <label>Email <input type=\"email\" name=\"email\"></label>\n\
        <label>Password <input type=\"password\" name=\"password\"></label>\n\
        <button type=\"submit\">Sign in</button>\n\
        </form>",
        action = paths::LOGIN_PATH,
    );
    Html(layout("Sign in", &body))
}

/// `GET /login`: sign-in form. It posts urlencoded fields back to `/login`.
pub async fn login_page() -> Html<String> {
    login_form_html(None)
}

/// Shell for the protected sections without their own handler.
pub async fn section(State(state): State<AppState>, auth: SignedIn, uri: Uri) -> Html<String> {
    let scope = state.scope.read().await.view();
    let title = section_title(uri.path());
    let body = format!("{}\n<h1>{}</h1>", header(&auth, &scope), escape(&title));
    Html(layout(&title, &body))
}

/// `GET /config`: configs in the current project.
pub async fn config_list(State(state): State<AppState>, auth: SignedIn) -> Html<String> {
    let scope = state.scope.read().await;
    let mut items = String::new();
    for c in state.catalog.configs.iter().filter(|c| scope.includes(&c.project_id)) {
        let _ = writeln!(items, "<li><a href=\"/config/{id}\">{name}</a></li>", id = escape(&c.id), name = escape(&c.name));
    }
    let body = format!("{}\n<h1>Configs</h1>\n<ul>\n{items}</ul>", header(&auth, &scope.view()));
    Html(layout("Configs", &body))
}

/// `GET /config/{id}`
pub async fn config_detail(State(state): State<AppState>, auth: SignedIn, Path(id): Path<String>) -> Response {
    let Some(config) = state.catalog.config(&id) else {
        return not_found_view("Config", &id, "/config", "configs");
    };
    let scope = state.scope.read().await.view();
    let keys = config
        .keys
        .iter()
        .map(|k| format!("<li><code>{}</code></li>", escape(k)))
        .collect::<String>();
    let body = format!(
        "{}\n<h1>{}</h1>\n<p>{:?} in namespace <code>{}</code></p>\n<ul>{keys}</ul>\n<a href=\"/config\">Back to configs</a>",
        header(&auth, &scope),
        escape(&config.name),
        config.kind,
        escape(&config.namespace),
    );
    Html(layout(&config.name, &body)).into_response()
}

/// `GET /deploy`: stacks in the current project.
pub async fn stack_list(State(state): State<AppState>, auth: SignedIn) -> Html<String> {
    let scope = state.scope.read().await;
    let mut items = String::new();
    for s in state.catalog.stacks.iter().filter(|s| scope.includes(&s.project_id)) {
        let _ = writeln!(
            items,
            "<li><a href=\"/deploy/{id}\">{name}</a> ({status})</li>",
            id = escape(&s.id),
            name = escape(&s.name),
            status = escape(&s.status),
        );
    }
    let body = format!("{}\n<h1>Stacks</h1>\n<ul>\n{items}</ul>", header(&auth, &scope.view()));
    Html(layout("Stacks", &body))
}

/// `GET /deploy/{id}`
pub async fn stack_detail(State(state): State<AppState>, auth: SignedIn, Path(id): Path<String>) -> Response {
    let Some(stack) = state.catalog.stack(&id) else {
        return not_found_view("Stack", &id, "/deploy", "stacks");
    };
    let scope = state.scope.read().await.view();
    let services = stack
        .services
        .iter()
        .map(|s| format!("<li>{}</li>", escape(s)))
        .collect::<String>();
    let body = format!(
        "{}\n<h1>{}</h1>\n<p>Status: {}</p>\n<ul>{services}</ul>\n<a href=\"/deploy\">Back to stacks</a>",
        header(&auth, &scope),
        escape(&stack.name),
        escape(&stack.status),
    );
    Html(layout(&stack.name, &body)).into_response()
}

/// Fallback for unrouted paths.
pub async fn not_found(uri: Uri) -> Response {
    let body = format!("<h1>Page not found</h1>\n<p><code>{}</code></p>\n<a href=\"/dashboard\">Back to dashboard</a>", escape(uri.path()));
    (StatusCode::NOT_FOUND, Html(layout("Not found", &body))).into_response()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
