use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

use lectern_types::api::Notice;

use crate::session;

/// Failure of a user-facing operation.
///
/// Page flows turn these into a notice plus a redirect; JSON endpoints
/// turn them into a status code with an `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    AuthenticationRequired(String),

    #[error("{0}")]
    AuthorizationDenied(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationRequired(_) => StatusCode::UNAUTHORIZED,
            ApiError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the user. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Something went wrong on our side, please try again".to_string(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        match self {
            ApiError::Internal(e) => error!("Internal error: {:#}", e),
            other => debug!("Request rejected ({}): {}", other.status(), other),
        }
    }

    /// Sends the user back with a notice. Missing sign-in always lands on
    /// `/login`; everything else goes to `fallback`.
    pub fn into_redirect(self, jar: CookieJar, fallback: &str) -> Response {
        self.log();
        let target = match self {
            ApiError::AuthenticationRequired(_) => "/login",
            _ => fallback,
        };
        redirect_with_notice(jar, Notice::error(self.user_message()), target)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(serde_json::json!({ "error": self.user_message() }));
        (self.status(), body).into_response()
    }
}

/// 303 redirect carrying a one-shot notice cookie.
pub fn redirect_with_notice(jar: CookieJar, notice: Notice, to: &str) -> Response {
    (session::set_notice(jar, &notice), Redirect::to(to)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AuthenticationRequired("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::AuthorizationDenied("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_details_are_not_shown_to_users() {
        let err = ApiError::Internal(anyhow::anyhow!("disk I/O error at page 42"));
        assert!(!err.user_message().contains("disk"));

        let err = ApiError::Conflict("That username is already taken, try another".into());
        assert_eq!(err.user_message(), "That username is already taken, try another");
    }

    #[test]
    fn missing_sign_in_redirects_to_login() {
        let response = ApiError::AuthenticationRequired("log in".into())
            .into_redirect(CookieJar::new(), "/teacher/3");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");

        let response = ApiError::Validation("bad".into()).into_redirect(CookieJar::new(), "/teacher/3");
        assert_eq!(response.headers()["location"], "/teacher/3");
    }
}
