use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use lectern_db::Database;
use lectern_db::models::{Aggregate, NewRating, RatingOutcome};
use lectern_types::api::{Notice, RateForm, SessionUser};

use crate::error::{ApiError, redirect_with_notice};
use crate::middleware::MaybeUser;
use crate::state::{AppState, blocking};

/// Accepts only a plain run of digits naming a score from 1 to 5.
pub fn parse_score(raw: Option<&str>) -> Result<u8, ApiError> {
    let invalid = || ApiError::Validation("Something went wrong with your rating".into());

    let raw = raw.ok_or_else(invalid)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<u8>() {
        Ok(score @ 1..=5) => Ok(score),
        _ => Err(invalid()),
    }
}

/// Records a rating and returns the teacher's refreshed aggregate.
///
/// A signed-in account holds at most one non-anonymous rating per teacher.
/// Anonymous ratings need no account and are never linked to one.
pub fn submit_rating(
    db: &Database,
    teacher_id: i64,
    score: u8,
    comment: Option<&str>,
    anonymous: bool,
    acting: Option<&SessionUser>,
) -> Result<Aggregate, ApiError> {
    if acting.is_none() && !anonymous {
        return Err(ApiError::AuthenticationRequired("You need to log in to leave a review".into()));
    }

    let rating = NewRating {
        teacher_id,
        account_id: if anonymous { None } else { acting.map(|u| u.id) },
        score,
        comment: comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string),
        anonymous,
    };

    match db.submit_rating(&rating)? {
        RatingOutcome::Recorded { aggregate, .. } => Ok(aggregate),
        RatingOutcome::Duplicate => Err(ApiError::Conflict("You have already reviewed this teacher!".into())),
        RatingOutcome::TeacherNotFound => Err(ApiError::NotFound("That teacher could not be found".into())),
    }
}

pub async fn rate(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    jar: CookieJar,
    Path(teacher_id): Path<i64>,
    Form(form): Form<RateForm>,
) -> Response {
    let teacher_page = format!("/teacher/{}", teacher_id);

    let score = match parse_score(form.rating.as_deref()) {
        Ok(score) => score,
        Err(e) => return e.into_redirect(jar, &teacher_page),
    };

    let anonymous = form.is_anonymous();
    let result = blocking(&state, move |db| {
        submit_rating(db, teacher_id, score, form.comment.as_deref(), anonymous, viewer.as_ref())
    })
    .await;

    match result {
        Ok(_) => redirect_with_notice(jar, Notice::success("Thanks for your review!"), &teacher_page),
        Err(e @ ApiError::NotFound(_)) => e.into_redirect(jar, "/"),
        Err(e) => e.into_redirect(jar, &teacher_page),
    }
}
