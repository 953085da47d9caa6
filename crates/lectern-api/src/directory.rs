use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use lectern_db::Database;
use lectern_types::api::{DirectoryQuery, DirectoryView, TeacherDetailView};
use lectern_types::models::{RatingEntry, Teacher, TeacherSummary};

use crate::error::ApiError;
use crate::middleware::MaybeUser;
use crate::session;
use crate::state::{AppState, blocking};

/// Blank searches list everyone.
fn normalize_query(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}

/// Teachers best rated first, optionally narrowed to those whose name or
/// department contains `query`.
pub fn list_teachers(db: &Database, query: Option<&str>) -> Result<Vec<Teacher>, ApiError> {
    Ok(db.list_teachers(normalize_query(query))?)
}

pub fn teacher_detail(db: &Database, id: i64) -> Result<(Teacher, Vec<RatingEntry>), ApiError> {
    let teacher = db
        .get_teacher(id)?
        .ok_or_else(|| ApiError::NotFound("That teacher could not be found".into()))?;
    let ratings = db.list_ratings_for_teacher(id)?;
    Ok((teacher, ratings))
}

// -- Handlers --

pub async fn index(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    jar: CookieJar,
    Query(params): Query<DirectoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.q.unwrap_or_default();
    let q = query.clone();
    let teachers = blocking(&state, move |db| list_teachers(db, Some(&q))).await?;

    let (jar, notice) = session::take_notice(jar);
    Ok((jar, Json(DirectoryView { viewer, notice, query, teachers })))
}

pub async fn teacher_page(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match blocking(&state, move |db| teacher_detail(db, id)).await {
        Ok((teacher, ratings)) => {
            let (jar, notice) = session::take_notice(jar);
            (jar, Json(TeacherDetailView { viewer, notice, teacher, ratings })).into_response()
        }
        Err(e) => e.into_redirect(jar, "/"),
    }
}

/// `GET /api/teachers?q=`
pub async fn api_teachers(
    State(state): State<AppState>,
    Query(params): Query<DirectoryQuery>,
) -> Result<Json<Vec<TeacherSummary>>, ApiError> {
    let teachers = blocking(&state, move |db| list_teachers(db, params.q.as_deref())).await?;
    Ok(Json(teachers.iter().map(TeacherSummary::from).collect()))
}
