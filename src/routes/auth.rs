//! Auth routes: mock login, logout, current identity.

use axum::Form;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::error::ConsoleError;
use crate::paths;
use crate::routes::pages;
use crate::services::session::{Identity, Session, SessionSnapshot};
use crate::state::AppState;

// =============================================================================
// SIGNED-IN EXTRACTOR
// =============================================================================

/// Identity held by the session store. Use as a handler parameter to
/// require one.
///
/// Rejects with a redirect to `/login` on protected paths and with 401
/// everywhere else. The redirect also expires the session cookie, otherwise
/// the guard would bounce the visitor from `/login` straight back.
pub struct SignedIn {
    pub user: Identity,
}

impl<S> axum::extract::FromRequestParts<S> for SignedIn
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if let Some(user) = app_state.session.identity().await {
            return Ok(Self { user });
        }
        match app_state.session.redirect_for(parts.uri.path()).await {
            Some(to) => {
                let jar = CookieJar::new().add(expired_session_cookie(&app_state));
                Err((jar, Redirect::temporary(to)).into_response())
            }
            None => Err(ConsoleError::Unauthenticated.into_response()),
        }
    }
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((state.config.session_cookie.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .build()
}

fn expired_session_cookie(state: &AppState) -> Cookie<'static> {
    let mut expired = session_cookie(state, String::new());
    expired.set_max_age(Duration::ZERO);
    expired
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// `POST /api/auth/login`: mock credential check, set session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginRequest>) -> Response {
    match state.session.login(&body.email, &body.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state, session.token.clone()));
            (jar, Json::<Session>(session)).into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "login rejected");
            e.into_response()
        }
    }
}

/// `POST /login`: urlencoded sign-in form. Success sets the session cookie
/// and lands on the dashboard; failure re-renders the form with 401.
pub async fn login_form(State(state): State<AppState>, jar: CookieJar, Form(body): Form<LoginRequest>) -> Response {
    match state.session.login(&body.email, &body.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state, session.token));
            (jar, Redirect::to(paths::LANDING_PATH)).into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "form login rejected");
            (StatusCode::UNAUTHORIZED, pages::login_form_html(Some(&e.to_string()))).into_response()
        }
    }
}

/// `POST /api/auth/logout`: clear the store and expire the cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    state.session.logout().await;
    (jar.add(expired_session_cookie(&state)), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: current identity.
pub async fn me(auth: SignedIn) -> Json<Identity> {
    Json(auth.user)
}

/// `GET /api/auth/status`: identity and loading flag, token omitted. Never rejects.
pub async fn status(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
