use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use lectern_db::Database;
use lectern_types::api::{ChatListView, ChatRoomView, FormView, NewRoomForm, SendMessageForm, SessionUser};
use lectern_types::models::{ChatMessage, ChatRoom, RoomSummary, RoomType, TeacherName};

use crate::error::ApiError;
use crate::session;
use crate::state::{AppState, blocking};

/// Teachers offered for discussion links on a room page.
const ROOM_TEACHER_LINKS: u32 = 20;

fn room_not_found() -> ApiError {
    ApiError::NotFound("That chat room does not exist".into())
}

pub fn create_room(
    db: &Database,
    name: &str,
    description: Option<&str>,
    room_type: Option<&str>,
    creator: &SessionUser,
) -> Result<i64, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Your room needs a name".into()));
    }

    let room_type = match room_type.map(str::trim).filter(|t| !t.is_empty()) {
        None => RoomType::Public,
        Some(raw) => raw
            .parse::<RoomType>()
            .map_err(|_| ApiError::Validation("Rooms are either public or private".into()))?,
    };
    let description = description.map(str::trim).filter(|d| !d.is_empty());

    Ok(db.create_room(name, description, room_type, creator.id)?)
}

/// Public rooms plus the private rooms this account may see.
pub fn list_rooms_visible_to(
    db: &Database,
    account: &SessionUser,
) -> Result<(Vec<RoomSummary>, Vec<RoomSummary>), ApiError> {
    Ok((db.list_public_rooms()?, db.list_private_rooms_visible_to(account.id)?))
}

/// A private room opens to its creator and to anyone who has posted in it.
pub fn get_room(
    db: &Database,
    room_id: i64,
    account: &SessionUser,
) -> Result<(ChatRoom, Vec<ChatMessage>, Vec<TeacherName>), ApiError> {
    let room = db.get_room(room_id)?.ok_or_else(room_not_found)?;

    if !db.can_view_room(&room, account.id)? {
        return Err(ApiError::AuthorizationDenied("That chat room is private".into()));
    }

    let messages = db.list_messages(room_id)?;
    let teachers = db.list_teacher_names(ROOM_TEACHER_LINKS)?;
    Ok((room, messages, teachers))
}

/// Appends a message. Blank messages are dropped without error and yield `None`.
pub fn post_message(
    db: &Database,
    room_id: i64,
    text: &str,
    account: &SessionUser,
) -> Result<Option<i64>, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        debug!("Dropping blank message for room {}", room_id);
        return Ok(None);
    }

    if db.get_room(room_id)?.is_none() {
        return Err(room_not_found());
    }

    let id = db.insert_message(room_id, account.id, text, &account.username)?;
    Ok(Some(id))
}

pub fn ensure_teacher_room(db: &Database, teacher_id: i64, creator: &SessionUser) -> Result<i64, ApiError> {
    db.ensure_teacher_room(teacher_id, creator.id)?
        .ok_or_else(|| ApiError::NotFound("That teacher could not be found".into()))
}

// -- Handlers --

pub async fn chat_list(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let account = viewer.clone();
    let (public_rooms, private_rooms) =
        blocking(&state, move |db| list_rooms_visible_to(db, &account)).await?;

    let (jar, notice) = session::take_notice(jar);
    Ok((jar, Json(ChatListView { viewer, notice, public_rooms, private_rooms })))
}

pub async fn new_room_page(Extension(viewer): Extension<SessionUser>, jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = session::take_notice(jar);
    (jar, Json(FormView { viewer: Some(viewer), notice }))
}

pub async fn new_room(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
    Form(form): Form<NewRoomForm>,
) -> Response {
    let result = blocking(&state, move |db| {
        create_room(db, &form.name, form.description.as_deref(), form.room_type.as_deref(), &viewer)
    })
    .await;

    match result {
        Ok(_) => Redirect::to("/chat").into_response(),
        Err(e) => e.into_redirect(jar, "/chat/new"),
    }
}

pub async fn room_page(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
    Path(room_id): Path<i64>,
) -> Response {
    let account = viewer.clone();
    match blocking(&state, move |db| get_room(db, room_id, &account)).await {
        Ok((room, messages, teachers)) => {
            let (jar, notice) = session::take_notice(jar);
            (jar, Json(ChatRoomView { viewer, notice, room, messages, teachers })).into_response()
        }
        Err(e) => e.into_redirect(jar, "/chat"),
    }
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
    Path(room_id): Path<i64>,
    Form(form): Form<SendMessageForm>,
) -> Response {
    match blocking(&state, move |db| post_message(db, room_id, &form.message, &viewer)).await {
        Ok(_) => Redirect::to(&format!("/chat/{}", room_id)).into_response(),
        Err(e) => e.into_redirect(jar, "/chat"),
    }
}

pub async fn teacher_room(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
    Path(teacher_id): Path<i64>,
) -> Response {
    match blocking(&state, move |db| ensure_teacher_room(db, teacher_id, &viewer)).await {
        Ok(_) => Redirect::to("/chat").into_response(),
        Err(e) => e.into_redirect(jar, "/chat"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(db: &Database, name: &str) -> SessionUser {
        let id = db.create_account(name, "h", false).unwrap().unwrap();
        SessionUser { id, username: name.into(), is_admin: false }
    }

    #[test]
    fn room_type_defaults_to_public_and_rejects_unknown() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");

        let id = create_room(&db, "general", None, None, &alice).unwrap();
        assert_eq!(db.get_room(id).unwrap().unwrap().room_type, RoomType::Public);

        let err = create_room(&db, "x", None, Some("secret"), &alice).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = create_room(&db, "  ", None, Some("public"), &alice).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn private_room_visibility_follows_posting() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");

        let room = create_room(&db, "study", Some("exam prep"), Some("private"), &alice).unwrap();

        assert!(get_room(&db, room, &alice).is_ok());
        assert!(matches!(get_room(&db, room, &bob), Err(ApiError::AuthorizationDenied(_))));
        let (_, private) = list_rooms_visible_to(&db, &bob).unwrap();
        assert!(private.is_empty());

        post_message(&db, room, "can I join?", &bob).unwrap().unwrap();

        let (_, messages, _) = get_room(&db, room, &bob).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].username.as_deref(), Some("bob"));
        let (_, private) = list_rooms_visible_to(&db, &bob).unwrap();
        assert_eq!(private.len(), 1);
    }

    #[test]
    fn whitespace_message_is_dropped() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let room = create_room(&db, "general", None, None, &alice).unwrap();

        assert_eq!(post_message(&db, room, "  \n\t ", &alice).unwrap(), None);
        assert!(db.list_messages(room).unwrap().is_empty());

        post_message(&db, room, "  hi there  ", &alice).unwrap().unwrap();
        assert_eq!(db.list_messages(room).unwrap()[0].message, "hi there");
    }

    #[test]
    fn posting_to_missing_room_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        assert!(matches!(post_message(&db, 9, "hello", &alice), Err(ApiError::NotFound(_))));
        assert!(matches!(get_room(&db, 9, &alice), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn room_page_links_teachers() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        db.seed_teachers_if_empty().unwrap();
        let room = create_room(&db, "general", None, None, &alice).unwrap();

        let (_, _, teachers) = get_room(&db, room, &alice).unwrap();
        assert_eq!(teachers.len(), ROOM_TEACHER_LINKS as usize);
    }

    #[test]
    fn teacher_room_for_missing_teacher_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        assert!(matches!(ensure_teacher_room(&db, 1, &alice), Err(ApiError::NotFound(_))));
    }
}
