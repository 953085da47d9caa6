use anyhow::Result;
use rusqlite::{Connection, Row};
use tracing::info;

use lectern_types::models::{Teacher, TeacherName};

use super::{OptionalExt, parse_timestamp};
use crate::Database;
use crate::seed::TEACHER_ROSTER;

const TEACHER_COLUMNS: &str =
    "id, name, department, email, added_by, average_rating, total_ratings, created_at";

impl Database {
    pub fn create_teacher(
        &self,
        name: &str,
        department: &str,
        email: Option<&str>,
        added_by: Option<i64>,
    ) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO teachers (name, department, email, added_by) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, department, email, added_by],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.with_conn(|conn| query_teacher(conn, id))
    }

    /// Directory listing, best rated first. A non-empty `query` keeps teachers
    /// whose name or department contains it (ASCII case-insensitive).
    pub fn list_teachers(&self, query: Option<&str>) -> Result<Vec<Teacher>> {
        self.with_conn(|conn| match query {
            Some(q) => {
                let pattern = format!("%{}%", escape_like(q));
                let sql = format!(
                    "SELECT {TEACHER_COLUMNS} FROM teachers
                     WHERE name LIKE ?1 ESCAPE '\\' OR department LIKE ?1 ESCAPE '\\'
                     ORDER BY average_rating DESC, name ASC, id ASC"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([pattern], map_teacher)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
            None => {
                let sql = format!(
                    "SELECT {TEACHER_COLUMNS} FROM teachers
                     ORDER BY average_rating DESC, name ASC, id ASC"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], map_teacher)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
        })
    }

    /// Admin dashboard ordering: most recently added first.
    pub fn list_teachers_by_created(&self) -> Result<Vec<Teacher>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY created_at DESC, id DESC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], map_teacher)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_teacher_names(&self, limit: u32) -> Result<Vec<TeacherName>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM teachers ORDER BY name LIMIT ?1")?;
            let rows = stmt
                .query_map([limit], |row| {
                    Ok(TeacherName {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Removes a teacher and every rating attached to it.
    /// Returns false when no such teacher exists.
    pub fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let ratings = tx.execute("DELETE FROM ratings WHERE teacher_id = ?1", [id])?;
            let teachers = tx.execute("DELETE FROM teachers WHERE id = ?1", [id])?;
            tx.commit()?;

            if teachers > 0 {
                info!("Teacher {} deleted along with {} ratings", id, ratings);
            }
            Ok(teachers > 0)
        })
    }

    pub fn count_teachers(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM teachers", [], |r| r.get(0))?;
            Ok(count)
        })
    }

    /// Loads the school roster into an empty directory. Returns how many rows were written.
    pub fn seed_teachers_if_empty(&self) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM teachers", [], |r| r.get(0))?;
            if existing > 0 {
                return Ok(0);
            }

            {
                let mut stmt = tx.prepare("INSERT INTO teachers (name, department) VALUES (?1, ?2)")?;
                for (name, department) in TEACHER_ROSTER {
                    stmt.execute([name, department])?;
                }
            }
            tx.commit()?;

            info!("Directory seeded with {} teachers", TEACHER_ROSTER.len());
            Ok(TEACHER_ROSTER.len())
        })
    }
}

pub(super) fn query_teacher(conn: &Connection, id: i64) -> Result<Option<Teacher>> {
    let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let row = stmt.query_row([id], map_teacher).optional()?;
    Ok(row)
}

fn map_teacher(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        name: row.get(1)?,
        department: row.get(2)?,
        email: row.get(3)?,
        added_by: row.get(4)?,
        average_rating: row.get(5)?,
        total_ratings: row.get(6)?,
        created_at: parse_timestamp(&row.get::<_, String>(7)?),
    })
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(teachers: &[Teacher]) -> Vec<&str> {
        teachers.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn search_matches_name_or_department_case_insensitively() {
        let db = Database::open_in_memory().unwrap();
        db.create_teacher("Julie Beaulé", "Arts", None, None).unwrap();
        db.create_teacher("Boris Clain", "Mathématique", None, None).unwrap();
        db.create_teacher("Olivier Bourque", "Sciences et Technologies", None, None).unwrap();

        let hits = db.list_teachers(Some("julie")).unwrap();
        assert_eq!(names(&hits), vec!["Julie Beaulé"]);

        let hits = db.list_teachers(Some("SCIENCES")).unwrap();
        assert_eq!(names(&hits), vec!["Olivier Bourque"]);

        assert_eq!(db.list_teachers(None).unwrap().len(), 3);
        assert!(db.list_teachers(Some("nobody")).unwrap().is_empty());
    }

    #[test]
    fn wildcards_in_query_match_literally() {
        let db = Database::open_in_memory().unwrap();
        db.create_teacher("Ann", "Arts", None, None).unwrap();
        db.create_teacher("100% Bob", "Arts", None, None).unwrap();

        assert_eq!(names(&db.list_teachers(Some("%")).unwrap()), vec!["100% Bob"]);
        assert!(db.list_teachers(Some("A_n")).unwrap().is_empty());
    }

    #[test]
    fn listing_orders_by_average_descending() {
        let db = Database::open_in_memory().unwrap();
        let low = db.create_teacher("Low", "Arts", None, None).unwrap();
        let high = db.create_teacher("High", "Arts", None, None).unwrap();
        db.create_teacher("Unrated", "Arts", None, None).unwrap();

        db.with_conn_mut(|conn| {
            conn.execute("UPDATE teachers SET average_rating = 2.5 WHERE id = ?1", [low])?;
            conn.execute("UPDATE teachers SET average_rating = 4.75 WHERE id = ?1", [high])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(names(&db.list_teachers(None).unwrap()), vec!["High", "Low", "Unrated"]);
    }

    #[test]
    fn seeding_runs_only_on_empty_directory() {
        let db = Database::open_in_memory().unwrap();

        let seeded = db.seed_teachers_if_empty().unwrap();
        assert_eq!(seeded, TEACHER_ROSTER.len());
        assert_eq!(db.seed_teachers_if_empty().unwrap(), 0);
        assert_eq!(db.count_teachers().unwrap(), TEACHER_ROSTER.len() as i64);

        let julie = db.list_teachers(Some("Julie Beaulé")).unwrap();
        assert_eq!(julie.len(), 1);
        assert_eq!(julie[0].department, "Arts");
        assert_eq!(julie[0].total_ratings, 0);
    }

    #[test]
    fn teacher_names_are_sorted_and_limited() {
        let db = Database::open_in_memory().unwrap();
        for name in ["Carla", "Anna", "Bruno"] {
            db.create_teacher(name, "Arts", None, None).unwrap();
        }

        let listed: Vec<String> = db.list_teacher_names(2).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(listed, vec!["Anna", "Bruno"]);
    }

    #[test]
    fn deleting_unknown_teacher_reports_false() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.delete_teacher(42).unwrap());
    }
}
