mod accounts;
mod chat;
mod ratings;
mod teachers;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// SQLite stores `datetime('now')` as "YYYY-MM-DD HH:MM:SS" without timezone.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_and_rfc3339_timestamps() {
        let sqlite = parse_timestamp("2024-03-01 12:30:45");
        assert_eq!(sqlite.to_rfc3339(), "2024-03-01T12:30:45+00:00");

        let rfc = parse_timestamp("2024-03-01T12:30:45Z");
        assert_eq!(rfc, sqlite);

        assert_eq!(parse_timestamp("garbage"), DateTime::<Utc>::default());
    }
}
