//! Signed session cookie and one-shot notice cookie.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use lectern_types::api::{Notice, SessionClaims, SessionUser};

use crate::state::SessionSettings;

pub const SESSION_COOKIE: &str = "lectern_session";
pub const NOTICE_COOKIE: &str = "lectern_notice";

pub fn create_token(settings: &SessionSettings, user: &SessionUser) -> anyhow::Result<String> {
    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        is_admin: user.is_admin,
        exp: (chrono::Utc::now() + chrono::Duration::days(settings.lifetime_days)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the session user for a valid, unexpired token.
pub fn verify_token(settings: &SessionSettings, token: &str) -> Option<SessionUser> {
    match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Some(data.claims.into()),
        Err(e) => {
            debug!("Ignoring invalid session token: {}", e);
            None
        }
    }
}

pub fn user_from_headers(settings: &SessionSettings, headers: &HeaderMap) -> Option<SessionUser> {
    let jar = CookieJar::from_headers(headers);
    let cookie = jar.get(SESSION_COOKIE)?;
    verify_token(settings, cookie.value())
}

pub fn start_session(jar: CookieJar, settings: &SessionSettings, token: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies);
    jar.add(cookie)
}

pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub fn set_notice(jar: CookieJar, notice: &Notice) -> CookieJar {
    let encoded = match serde_json::to_vec(notice) {
        Ok(bytes) => B64.encode(bytes),
        Err(_) => return jar,
    };
    let cookie = Cookie::build((NOTICE_COOKIE, encoded))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Reads the pending notice, if any, and clears it.
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };

    let notice = B64
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Notice>(&bytes).ok());

    (jar.remove(Cookie::build(NOTICE_COOKIE).path("/")), notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn settings(secret: &str) -> SessionSettings {
        SessionSettings {
            secret: secret.to_string(),
            lifetime_days: 7,
            secure_cookies: false,
        }
    }

    fn alice() -> SessionUser {
        SessionUser {
            id: 3,
            username: "alice".into(),
            is_admin: true,
        }
    }

    #[test]
    fn token_carries_identity_and_admin_flag() {
        let s = settings("test-secret");
        let token = create_token(&s, &alice()).unwrap();
        assert_eq!(verify_token(&s, &token), Some(alice()));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = create_token(&settings("one"), &alice()).unwrap();
        assert_eq!(verify_token(&settings("two"), &token), None);
        assert_eq!(verify_token(&settings("one"), "not-a-token"), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut s = settings("test-secret");
        s.lifetime_days = -1;
        let token = create_token(&s, &alice()).unwrap();
        assert_eq!(verify_token(&s, &token), None);
    }

    #[test]
    fn session_is_read_from_cookie_header() {
        let s = settings("test-secret");
        let token = create_token(&s, &alice()).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("other=1; {}={}", SESSION_COOKIE, token).parse().unwrap(),
        );
        assert_eq!(user_from_headers(&s, &headers), Some(alice()));
        assert_eq!(user_from_headers(&s, &HeaderMap::new()), None);
    }

    #[test]
    fn notice_is_read_once() {
        let jar = set_notice(CookieJar::new(), &Notice::success("Thanks for your review!"));
        let (jar, notice) = take_notice(jar);
        assert_eq!(notice, Some(Notice::success("Thanks for your review!")));

        let (_, again) = take_notice(jar);
        assert_eq!(again, None);
    }
}
