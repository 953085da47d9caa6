use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The password hash stays in the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub email: Option<String>,
    pub added_by: Option<i64>,
    /// Mean of every rating for this teacher, rounded to 2 decimals.
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: DateTime<Utc>,
}

/// Directory row returned by `GET /api/teachers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub average_rating: f64,
    pub total_ratings: i64,
}

impl From<&Teacher> for TeacherSummary {
    fn from(t: &Teacher) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            department: t.department.clone(),
            average_rating: t.average_rating,
            total_ratings: t.total_ratings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherName {
    pub id: i64,
    pub name: String,
}

/// A rating joined with its author, as shown on a teacher's page.
/// `username` is `None` for anonymous ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub account_id: Option<i64>,
    pub rating: u8,
    pub comment: Option<String>,
    pub is_anonymous: bool,
    pub username: Option<String>,
    pub author_is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Public,
    Private,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Public => "public",
            RoomType::Private => "private",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown room type '{0}'")]
pub struct ParseRoomTypeError(pub String);

impl FromStr for RoomType {
    type Err = ParseRoomTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(RoomType::Public),
            "private" => Ok(RoomType::Private),
            other => Err(ParseRoomTypeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub room_type: RoomType,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Room listing entry with the creator's name and how many messages it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    #[serde(flatten)]
    pub room: ChatRoom,
    pub creator: Option<String>,
    pub message_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: i64,
    pub account_id: Option<i64>,
    pub message: String,
    /// Username at the time of posting.
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_type_parses_lowercase_only() {
        assert_eq!("public".parse::<RoomType>().unwrap(), RoomType::Public);
        assert_eq!("private".parse::<RoomType>().unwrap(), RoomType::Private);
        assert!("Private".parse::<RoomType>().is_err());
        assert!("".parse::<RoomType>().is_err());
    }

    #[test]
    fn room_summary_flattens_room() {
        let summary = RoomSummary {
            room: ChatRoom {
                id: 7,
                name: "general".into(),
                description: None,
                room_type: RoomType::Private,
                created_by: Some(1),
                created_at: DateTime::default(),
            },
            creator: Some("alice".into()),
            message_count: 3,
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["room_type"], "private");
        assert_eq!(value["creator"], "alice");
        assert_eq!(value["message_count"], 3);
    }
}
