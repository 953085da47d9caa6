use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;
use crate::{admin, auth, chat, directory, ratings};

/// Full route table. Transport layers (tracing, etc.) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(directory::index))
        .route("/teacher/{id}", get(directory::teacher_page))
        .route("/rate/{id}", post(ratings::rate))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/api/teachers", get(directory::api_teachers))
        .route("/health", get(health));

    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/add_teacher", get(admin::add_teacher_page).post(admin::add_teacher_submit))
        .route("/admin/delete_teacher/{id}", post(admin::delete_teacher_submit))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let chat_routes = Router::new()
        .route("/chat", get(chat::chat_list))
        .route("/chat/new", get(chat::new_room_page).post(chat::new_room))
        .route("/chat/{id}", get(chat::room_page))
        .route("/chat/{id}/send", post(chat::send_message))
        .route("/chat/teachers/{id}", post(chat::teacher_room))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(chat_routes)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
