use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Brings the schema up to date. Safe to call on every start.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE accounts (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                username    TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                is_admin    INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE teachers (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                department      TEXT NOT NULL,
                email           TEXT,
                added_by        INTEGER REFERENCES accounts(id),
                average_rating  REAL NOT NULL DEFAULT 0,
                total_ratings   INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE ratings (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                teacher_id    INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
                account_id    INTEGER REFERENCES accounts(id),
                rating        INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
                comment       TEXT,
                is_anonymous  INTEGER NOT NULL DEFAULT 0,
                created_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_ratings_teacher ON ratings(teacher_id);

            -- One signed rating per account and teacher
            CREATE UNIQUE INDEX idx_ratings_signed
                ON ratings(teacher_id, account_id)
                WHERE is_anonymous = 0 AND account_id IS NOT NULL;

            CREATE TABLE chat_rooms (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                name         TEXT NOT NULL,
                description  TEXT,
                room_type    TEXT NOT NULL DEFAULT 'public'
                             CHECK (room_type IN ('public', 'private')),
                created_by   INTEGER REFERENCES accounts(id),
                created_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE chat_messages (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id     INTEGER NOT NULL REFERENCES chat_rooms(id),
                account_id  INTEGER REFERENCES accounts(id),
                message     TEXT NOT NULL,
                username    TEXT,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_chat_messages_room
                ON chat_messages(room_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
