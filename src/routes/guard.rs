//! Route guard: request-time redirect on session cookie presence.
//!
//! SECURITY
//! ========
//! This guard is deliberately named `insecure_demo_guard`: it checks only
//! that a cookie with the configured name exists. It never reads the value,
//! verifies a signature, or checks expiry, so any client that sets the
//! cookie passes. Page handlers still consult the session store before
//! rendering an identity.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::paths;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide what to do with a request for `path`. Stateless.
#[must_use]
pub fn evaluate(path: &str, has_session_cookie: bool) -> GuardDecision {
    if paths::is_protected_path(path) && !has_session_cookie {
        return GuardDecision::Redirect(paths::LOGIN_PATH);
    }
    if paths::is_login_path(path) && has_session_cookie {
        return GuardDecision::Redirect(paths::LANDING_PATH);
    }
    GuardDecision::Allow
}

/// Axum middleware applying [`evaluate`] to every request.
pub async fn insecure_demo_guard(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let has_cookie = jar.get(&state.config.session_cookie).is_some();
    match evaluate(request.uri().path(), has_cookie) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(to) => {
            debug!(path = request.uri().path(), to, has_cookie, "route guard redirect");
            Redirect::temporary(to).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
