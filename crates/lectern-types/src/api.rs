use serde::{Deserialize, Serialize};

use crate::models::{
    Account, ChatMessage, ChatRoom, RatingEntry, RoomSummary, Teacher, TeacherName,
};

// -- Session --

/// Claims carried by the signed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub username: String,
    pub is_admin: bool,
    pub exp: usize,
}

/// The signed-in account as seen by handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<SessionClaims> for SessionUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

// -- Notices --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// One-shot message shown on the next page a user lands on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

// -- Forms --
//
// Every field defaults so that a missing field becomes a validation notice
// rather than an extractor rejection.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RateForm {
    pub rating: Option<String>,
    pub comment: Option<String>,
    /// HTML checkbox: present as `on` when ticked.
    pub anonymous: Option<String>,
}

impl RateForm {
    pub fn is_anonymous(&self) -> bool {
        self.anonymous.as_deref() == Some("on")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddTeacherForm {
    pub name: String,
    pub department: String,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewRoomForm {
    pub name: String,
    pub description: Option<String>,
    pub room_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendMessageForm {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
}

// -- Page views --

#[derive(Debug, Serialize)]
pub struct DirectoryView {
    pub viewer: Option<SessionUser>,
    pub notice: Option<Notice>,
    pub query: String,
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Serialize)]
pub struct TeacherDetailView {
    pub viewer: Option<SessionUser>,
    pub notice: Option<Notice>,
    pub teacher: Teacher,
    pub ratings: Vec<RatingEntry>,
}

/// View for the bare form pages (login, register, new room, add teacher).
#[derive(Debug, Serialize)]
pub struct FormView {
    pub viewer: Option<SessionUser>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub viewer: SessionUser,
    pub notice: Option<Notice>,
    pub teachers: Vec<Teacher>,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize)]
pub struct ChatListView {
    pub viewer: SessionUser,
    pub notice: Option<Notice>,
    pub public_rooms: Vec<RoomSummary>,
    pub private_rooms: Vec<RoomSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChatRoomView {
    pub viewer: SessionUser,
    pub notice: Option<Notice>,
    pub room: ChatRoom,
    pub messages: Vec<ChatMessage>,
    pub teachers: Vec<TeacherName>,
}
