use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use lectern_db::Database;
use lectern_types::api::{AddTeacherForm, AdminView, FormView, Notice, SessionUser};
use lectern_types::models::{Account, Teacher};

use crate::error::{ApiError, redirect_with_notice};
use crate::session;
use crate::state::{AppState, blocking};

pub fn dashboard_data(db: &Database) -> Result<(Vec<Teacher>, Vec<Account>), ApiError> {
    Ok((db.list_teachers_by_created()?, db.list_accounts()?))
}

pub fn add_teacher(db: &Database, form: &AddTeacherForm, acting: &SessionUser) -> Result<i64, ApiError> {
    let name = form.name.trim();
    let department = form.department.trim();
    if name.is_empty() || department.is_empty() {
        return Err(ApiError::Validation("You need to include a name and department".into()));
    }
    let email = form.email.as_deref().map(str::trim).filter(|e| !e.is_empty());

    let id = db.create_teacher(name, department, email, Some(acting.id))?;
    info!("Teacher {} ({}) added by {}", name, id, acting.username);
    Ok(id)
}

pub fn delete_teacher(db: &Database, id: i64) -> Result<(), ApiError> {
    if db.delete_teacher(id)? {
        Ok(())
    } else {
        Err(ApiError::NotFound("That teacher could not be found".into()))
    }
}

// -- Handlers --

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let (teachers, accounts) = blocking(&state, dashboard_data).await?;
    let (jar, notice) = session::take_notice(jar);
    Ok((jar, Json(AdminView { viewer, notice, teachers, accounts })))
}

pub async fn add_teacher_page(Extension(viewer): Extension<SessionUser>, jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = session::take_notice(jar);
    (jar, Json(FormView { viewer: Some(viewer), notice }))
}

pub async fn add_teacher_submit(
    State(state): State<AppState>,
    Extension(viewer): Extension<SessionUser>,
    jar: CookieJar,
    Form(form): Form<AddTeacherForm>,
) -> Response {
    match blocking(&state, move |db| add_teacher(db, &form, &viewer)).await {
        Ok(_) => redirect_with_notice(jar, Notice::success("The teacher has been added!"), "/admin"),
        Err(e) => e.into_redirect(jar, "/admin/add_teacher"),
    }
}

pub async fn delete_teacher_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match blocking(&state, move |db| delete_teacher(db, id)).await {
        Ok(()) => redirect_with_notice(jar, Notice::success("Teacher has been removed"), "/admin"),
        Err(e) => e.into_redirect(jar, "/admin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(db: &Database) -> SessionUser {
        let id = db.create_account("root", "h", true).unwrap().unwrap();
        SessionUser { id, username: "root".into(), is_admin: true }
    }

    #[test]
    fn add_teacher_requires_name_and_department() {
        let db = Database::open_in_memory().unwrap();
        let root = admin(&db);

        let form = AddTeacherForm { name: "  ".into(), department: "Arts".into(), email: None };
        assert!(matches!(add_teacher(&db, &form, &root), Err(ApiError::Validation(_))));

        let form = AddTeacherForm {
            name: "Rémi Bolduc".into(),
            department: "Arts".into(),
            email: Some("".into()),
        };
        let id = add_teacher(&db, &form, &root).unwrap();

        let teacher = db.get_teacher(id).unwrap().unwrap();
        assert_eq!(teacher.email, None);
        assert_eq!(teacher.added_by, Some(root.id));
        assert_eq!((teacher.average_rating, teacher.total_ratings), (0.0, 0));
    }

    #[test]
    fn dashboard_lists_newest_teachers_first_and_all_accounts() {
        let db = Database::open_in_memory().unwrap();
        let root = admin(&db);
        db.create_account("alice", "h", false).unwrap();
        db.create_teacher("Old", "Arts", None, None).unwrap();
        db.create_teacher("New", "Arts", None, Some(root.id)).unwrap();

        let (teachers, accounts) = dashboard_data(&db).unwrap();
        assert_eq!(teachers[0].name, "New");
        assert_eq!(accounts.len(), 2);
    }

    #[test]
    fn deleting_missing_teacher_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(delete_teacher(&db, 5), Err(ApiError::NotFound(_))));
    }
}
