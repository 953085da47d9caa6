use anyhow::Result;
use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

use lectern_types::models::RatingEntry;

use super::{OptionalExt, parse_timestamp};
use crate::Database;
use crate::models::{Aggregate, NewRating, RatingOutcome};

impl Database {
    /// Records a rating and refreshes the teacher's aggregate in one transaction,
    /// so no reader ever sees a rating without its updated average.
    pub fn submit_rating(&self, rating: &NewRating) -> Result<RatingOutcome> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let teacher_exists = tx
                .query_row("SELECT 1 FROM teachers WHERE id = ?1", [rating.teacher_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !teacher_exists {
                return Ok(RatingOutcome::TeacherNotFound);
            }

            if let (Some(account_id), false) = (rating.account_id, rating.anonymous) {
                let existing: Option<i64> = tx
                    .query_row(
                        "SELECT id FROM ratings
                         WHERE teacher_id = ?1 AND account_id = ?2 AND is_anonymous = 0",
                        [rating.teacher_id, account_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                if existing.is_some() {
                    return Ok(RatingOutcome::Duplicate);
                }
            }

            tx.execute(
                "INSERT INTO ratings (teacher_id, account_id, rating, comment, is_anonymous)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    rating.teacher_id,
                    rating.account_id,
                    rating.score,
                    rating.comment,
                    rating.anonymous,
                ],
            )?;
            let rating_id = tx.last_insert_rowid();

            let aggregate = recompute_aggregate(&tx, rating.teacher_id)?;
            tx.commit()?;

            info!(
                "Rating {} recorded for teacher {} (avg {:.2} over {})",
                rating_id, rating.teacher_id, aggregate.average_rating, aggregate.total_ratings
            );
            Ok(RatingOutcome::Recorded { rating_id, aggregate })
        })
    }

    /// Ratings for a teacher, newest first, with the author's name when signed.
    pub fn list_ratings_for_teacher(&self, teacher_id: i64) -> Result<Vec<RatingEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT r.id, r.teacher_id, r.account_id, r.rating, r.comment, r.is_anonymous,
                        a.username, COALESCE(a.is_admin, 0), r.created_at
                 FROM ratings r
                 LEFT JOIN accounts a ON r.account_id = a.id
                 WHERE r.teacher_id = ?1
                 ORDER BY r.created_at DESC, r.id DESC",
            )?;

            let rows = stmt
                .query_map([teacher_id], |row| {
                    Ok(RatingEntry {
                        id: row.get(0)?,
                        teacher_id: row.get(1)?,
                        account_id: row.get(2)?,
                        rating: row.get(3)?,
                        comment: row.get(4)?,
                        is_anonymous: row.get(5)?,
                        username: row.get(6)?,
                        author_is_admin: row.get(7)?,
                        created_at: parse_timestamp(&row.get::<_, String>(8)?),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

/// Recomputes mean (rounded to 2 decimals) and count from the ratings table
/// and writes both back onto the teacher.
fn recompute_aggregate(conn: &Connection, teacher_id: i64) -> Result<Aggregate> {
    let (sum, count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(rating), 0), COUNT(*) FROM ratings WHERE teacher_id = ?1",
        [teacher_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let aggregate = Aggregate {
        average_rating: if count == 0 { 0.0 } else { round2(sum as f64 / count as f64) },
        total_ratings: count,
    };

    conn.execute(
        "UPDATE teachers SET average_rating = ?1, total_ratings = ?2 WHERE id = ?3",
        rusqlite::params![aggregate.average_rating, aggregate.total_ratings, teacher_id],
    )?;

    Ok(aggregate)
}

/// Rounds the exact binary value, halves going to the even digit
/// (33/8 stores 4.12, not 4.13).
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
