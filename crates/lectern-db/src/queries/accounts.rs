use anyhow::Result;
use rusqlite::{Connection, ErrorCode};
use tracing::info;

use lectern_types::models::Account;

use super::{OptionalExt, parse_timestamp};
use crate::Database;
use crate::models::AccountRow;

impl Database {
    /// Inserts a new account. Returns `None` when the username is taken.
    pub fn create_account(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<Option<i64>> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO accounts (username, password, is_admin) VALUES (?1, ?2, ?3)",
                rusqlite::params![username, password_hash, is_admin],
            );

            match inserted {
                Ok(_) => {
                    let id = conn.last_insert_rowid();
                    info!("Account {} created (id {})", username, id);
                    Ok(Some(id))
                }
                Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Creates the account only if the username is free. Returns whether a row was written.
    pub fn ensure_account(&self, username: &str, password_hash: &str, is_admin: bool) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO accounts (username, password, is_admin) VALUES (?1, ?2, ?3)",
                rusqlite::params![username, password_hash, is_admin],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account(conn, "username", &username))
    }

    pub fn get_account_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account(conn, "id", &id))
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, is_admin, created_at FROM accounts ORDER BY id")?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(Account {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        is_admin: row.get(2)?,
                        created_at: parse_timestamp(&row.get::<_, String>(3)?),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_account(
    conn: &Connection,
    column: &str,
    value: &dyn rusqlite::types::ToSql,
) -> Result<Option<AccountRow>> {
    let sql = format!(
        "SELECT id, username, password, is_admin FROM accounts WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(AccountRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                is_admin: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn duplicate_username_keeps_original_hash() {
        let db = Database::open_in_memory().unwrap();

        let id = db.create_account("alice", "hash-1", false).unwrap();
        assert!(id.is_some());

        let second = db.create_account("alice", "hash-2", false).unwrap();
        assert!(second.is_none());

        let row = db.get_account_by_username("alice").unwrap().unwrap();
        assert_eq!(row.password, "hash-1");
        assert_eq!(Some(row.id), id);
        assert!(!row.is_admin);
    }

    #[test]
    fn ensure_account_only_inserts_once() {
        let db = Database::open_in_memory().unwrap();

        assert!(db.ensure_account("root", "h1", true).unwrap());
        assert!(!db.ensure_account("root", "h2", true).unwrap());

        let row = db.get_account_by_username("root").unwrap().unwrap();
        assert!(row.is_admin);
        assert_eq!(row.password, "h1");
        assert_eq!(db.list_accounts().unwrap().len(), 1);
    }

    #[test]
    fn lookup_by_id_and_missing_user() {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_account("bob", "h", false).unwrap().unwrap();

        assert_eq!(db.get_account_by_id(id).unwrap().unwrap().username, "bob");
        assert!(db.get_account_by_id(id + 1).unwrap().is_none());
        assert!(db.get_account_by_username("nobody").unwrap().is_none());
    }
}
