/// Store-side row and command types. Read models shared with the API live in
/// lectern-types; these only exist where the store needs something the API
/// must not see (password hashes) or a write-side shape.

pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

/// A validated rating ready to be written.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub teacher_id: i64,
    /// Always `None` for anonymous ratings.
    pub account_id: Option<i64>,
    pub score: u8,
    pub comment: Option<String>,
    pub anonymous: bool,
}

/// Teacher aggregate after a recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub average_rating: f64,
    pub total_ratings: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RatingOutcome {
    Recorded { rating_id: i64, aggregate: Aggregate },
    TeacherNotFound,
    /// The account already holds a signed rating for this teacher.
    Duplicate,
}
