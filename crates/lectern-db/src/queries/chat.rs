use anyhow::Result;
use rusqlite::Row;
use rusqlite::types::Type;
use tracing::info;

use lectern_types::models::{ChatMessage, ChatRoom, RoomSummary, RoomType};

use super::teachers::query_teacher;
use super::{OptionalExt, parse_timestamp};
use crate::Database;

const SUMMARY_SELECT: &str = "
    SELECT cr.id, cr.name, cr.description, cr.room_type, cr.created_by, cr.created_at,
           a.username,
           (SELECT COUNT(*) FROM chat_messages WHERE room_id = cr.id)
    FROM chat_rooms cr
    LEFT JOIN accounts a ON cr.created_by = a.id";

impl Database {
    pub fn create_room(
        &self,
        name: &str,
        description: Option<&str>,
        room_type: RoomType,
        created_by: i64,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO chat_rooms (name, description, room_type, created_by) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, description, room_type.as_str(), created_by],
            )?;
            let id = conn.last_insert_rowid();
            info!("Chat room '{}' ({}) created by account {}", name, room_type, created_by);
            Ok(id)
        })
    }

    pub fn get_room(&self, id: i64) -> Result<Option<ChatRoom>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, description, room_type, created_by, created_at
                     FROM chat_rooms WHERE id = ?1",
                    [id],
                    map_room,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_public_rooms(&self) -> Result<Vec<RoomSummary>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{SUMMARY_SELECT}
                 WHERE cr.room_type = 'public'
                 ORDER BY cr.created_at DESC, cr.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], map_summary)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Private rooms the account created or has posted in.
    pub fn list_private_rooms_visible_to(&self, account_id: i64) -> Result<Vec<RoomSummary>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{SUMMARY_SELECT}
                 WHERE cr.room_type = 'private'
                   AND (cr.created_by = ?1
                        OR EXISTS (SELECT 1 FROM chat_messages cm
                                   WHERE cm.room_id = cr.id AND cm.account_id = ?1))
                 ORDER BY cr.created_at DESC, cr.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([account_id], map_summary)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Public rooms are open to everyone; a private room only to its creator
    /// and to accounts that already posted in it.
    pub fn can_view_room(&self, room: &ChatRoom, account_id: i64) -> Result<bool> {
        if room.room_type == RoomType::Public || room.created_by == Some(account_id) {
            return Ok(true);
        }

        self.with_conn(|conn| {
            let posted: bool = conn.query_row(
                "SELECT EXISTS (SELECT 1 FROM chat_messages WHERE room_id = ?1 AND account_id = ?2)",
                [room.id, account_id],
                |row| row.get(0),
            )?;
            Ok(posted)
        })
    }

    pub fn insert_message(
        &self,
        room_id: i64,
        account_id: i64,
        message: &str,
        username: &str,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO chat_messages (room_id, account_id, message, username) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![room_id, account_id, message, username],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Full history of a room, oldest first.
    pub fn list_messages(&self, room_id: i64) -> Result<Vec<ChatMessage>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, room_id, account_id, message, username, created_at
                 FROM chat_messages
                 WHERE room_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;

            let rows = stmt
                .query_map([room_id], |row| {
                    Ok(ChatMessage {
                        id: row.get(0)?,
                        room_id: row.get(1)?,
                        account_id: row.get(2)?,
                        message: row.get(3)?,
                        username: row.get(4)?,
                        created_at: parse_timestamp(&row.get::<_, String>(5)?),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Finds or creates the private "<name> - Discussion" room for a teacher.
    /// Returns `None` when the teacher does not exist.
    pub fn ensure_teacher_room(&self, teacher_id: i64, created_by: i64) -> Result<Option<i64>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let Some(teacher) = query_teacher(&tx, teacher_id)? else {
                return Ok(None);
            };
            let room_name = format!("{} - Discussion", teacher.name);

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM chat_rooms WHERE name = ?1 AND room_type = 'private' ORDER BY id LIMIT 1",
                    [&room_name],
                    |row| row.get(0),
                )
                .optional()?;

            let room_id = match existing {
                Some(id) => id,
                None => {
                    tx.execute(
                        "INSERT INTO chat_rooms (name, description, room_type, created_by)
                         VALUES (?1, ?2, 'private', ?3)",
                        rusqlite::params![
                            room_name,
                            format!("Discussion about {}", teacher.name),
                            created_by
                        ],
                    )?;
                    let id = tx.last_insert_rowid();
                    info!("Discussion room {} opened for teacher {}", id, teacher_id);
                    id
                }
            };

            tx.commit()?;
            Ok(Some(room_id))
        })
    }
}

fn map_room(row: &Row<'_>) -> rusqlite::Result<ChatRoom> {
    let room_type = row
        .get::<_, String>(3)?
        .parse::<RoomType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(ChatRoom {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        room_type,
        created_by: row.get(4)?,
        created_at: parse_timestamp(&row.get::<_, String>(5)?),
    })
}

fn map_summary(row: &Row<'_>) -> rusqlite::Result<RoomSummary> {
    Ok(RoomSummary {
        room: map_room(row)?,
        creator: row.get(6)?,
        message_count: row.get(7)?,
    })
}
