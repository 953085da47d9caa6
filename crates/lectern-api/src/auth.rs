use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use lectern_db::Database;
use lectern_types::api::{CredentialsForm, FormView, Notice, SessionUser};

use crate::error::{ApiError, redirect_with_notice};
use crate::middleware::MaybeUser;
use crate::session;
use crate::state::{AppState, blocking};

/// Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        warn!("Stored password hash is not in PHC format");
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

pub fn register_account(db: &Database, username: &str, password: &str) -> Result<i64, ApiError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Hey, you forgot to fill something in".into()));
    }

    let password_hash = hash_password(password)?;

    db.create_account(username, &password_hash, false)?
        .ok_or_else(|| ApiError::Conflict("That username is already taken, try another".into()))
}

pub fn authenticate(db: &Database, username: &str, password: &str) -> Result<SessionUser, ApiError> {
    let invalid = || ApiError::AuthenticationRequired("Oops, wrong username or password".into());

    let account = db.get_account_by_username(username.trim())?.ok_or_else(invalid)?;
    if !verify_password(&account.password, password) {
        return Err(invalid());
    }

    Ok(SessionUser {
        id: account.id,
        username: account.username,
        is_admin: account.is_admin,
    })
}

// -- Handlers --

pub async fn login_page(MaybeUser(viewer): MaybeUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = session::take_notice(jar);
    (jar, Json(FormView { viewer, notice }))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let result = blocking(&state, move |db| authenticate(db, &form.username, &form.password)).await;

    let user = match result {
        Ok(user) => user,
        Err(e) => return e.into_redirect(jar, "/login"),
    };

    let token = match session::create_token(&state.session, &user) {
        Ok(token) => token,
        Err(e) => return ApiError::Internal(e).into_redirect(jar, "/login"),
    };

    info!("Account {} signed in", user.username);
    let jar = session::start_session(jar, &state.session, token);
    redirect_with_notice(jar, Notice::success("Hey there! You are logged in"), "/")
}

pub async fn logout(jar: CookieJar) -> Response {
    let jar = session::end_session(jar);
    redirect_with_notice(jar, Notice::info("See you later!"), "/")
}

pub async fn register_page(MaybeUser(viewer): MaybeUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = session::take_notice(jar);
    (jar, Json(FormView { viewer, notice }))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let result = blocking(&state, move |db| register_account(db, &form.username, &form.password)).await;

    match result {
        Ok(_) => redirect_with_notice(jar, Notice::success("All set! Now go ahead and log in"), "/login"),
        Err(e) => e.into_redirect(jar, "/register"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert_ne!(a, b);
        assert!(verify_password(&a, "hunter22"));
        assert!(!verify_password(&a, "hunter23"));
        assert!(!verify_password("plaintext", "plaintext"));
    }

    #[test]
    fn register_then_authenticate() {
        let db = Database::open_in_memory().unwrap();
        let id = register_account(&db, "alice", "correct horse").unwrap();

        let user = authenticate(&db, "alice", "correct horse").unwrap();
        assert_eq!(user, SessionUser { id, username: "alice".into(), is_admin: false });
    }

    #[test]
    fn duplicate_registration_is_a_conflict_and_keeps_hash() {
        let db = Database::open_in_memory().unwrap();
        register_account(&db, "alice", "first").unwrap();
        let before = db.get_account_by_username("alice").unwrap().unwrap().password;

        let err = register_account(&db, "alice", "second").unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let after = db.get_account_by_username("alice").unwrap().unwrap().password;
        assert_eq!(before, after);
        assert!(authenticate(&db, "alice", "first").is_ok());
    }

    #[test]
    fn blank_fields_are_validation_errors() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(register_account(&db, "", "pw"), Err(ApiError::Validation(_))));
        assert!(matches!(register_account(&db, "bob", ""), Err(ApiError::Validation(_))));
    }

    #[test]
    fn usernames_are_stored_trimmed() {
        let db = Database::open_in_memory().unwrap();
        let id = register_account(&db, "  alice ", "pw").unwrap();
        assert_eq!(db.get_account_by_id(id).unwrap().unwrap().username, "alice");

        assert!(matches!(register_account(&db, "alice", "other"), Err(ApiError::Conflict(_))));
        assert_eq!(authenticate(&db, "alice", "pw").unwrap().id, id);
        assert_eq!(authenticate(&db, " alice", "pw").unwrap().id, id);
    }

    #[test]
    fn wrong_password_and_unknown_user_fail_alike() {
        let db = Database::open_in_memory().unwrap();
        register_account(&db, "alice", "right").unwrap();

        let wrong = authenticate(&db, "alice", "wrong").unwrap_err();
        let unknown = authenticate(&db, "mallory", "right").unwrap_err();
        assert!(matches!(wrong, ApiError::AuthenticationRequired(_)));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}
