use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use lectern_types::api::SessionUser;

use crate::error::ApiError;
use crate::session;
use crate::state::AppState;

/// Session of the caller, if signed in. Never rejects.
pub struct MaybeUser(pub Option<SessionUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(MaybeUser(Some(user.clone())));
        }
        Ok(MaybeUser(session::user_from_headers(&state.session, &parts.headers)))
    }
}

fn resolve(state: &AppState, req: &Request) -> Option<SessionUser> {
    req.extensions()
        .get::<SessionUser>()
        .cloned()
        .or_else(|| session::user_from_headers(&state.session, req.headers()))
}

/// Sends anonymous callers to `/login`; otherwise exposes the
/// [`SessionUser`] as a request extension.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match resolve(&state, &req) {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Lets only admins through. Non-admins go home with a notice.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match resolve(&state, &req) {
        Some(user) if user.is_admin => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Some(_) => ApiError::AuthorizationDenied("Sorry, this page is for admins only".into())
            .into_redirect(jar, "/"),
        None => Redirect::to("/login").into_response(),
    }
}
