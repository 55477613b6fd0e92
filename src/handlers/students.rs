use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde_json::{json, Value};

use super::field;
use crate::db::Db;
use crate::error::{PortalError, Result};
use crate::registry::{self, AddOutcome};
use crate::session::{SessionData, SessionManager};
use crate::validate;

#[get("/students")]
pub async fn list_students(
    req: HttpRequest,
    db: web::Data<Db>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    // Unauthenticated browsers are sent to the login page rather than
    // getting a JSON error.
    let authenticated = req
        .cookie("session_id")
        .map(|c| session_manager.validate_session(c.value()).is_some())
        .unwrap_or(false);
    if !authenticated {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, "/login"))
            .finish());
    }

    let conn = db
        .lock()
        .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
    let students = registry::list(&conn)?;

    Ok(HttpResponse::Ok().json(students))
}

#[post("/student")]
pub async fn add_student(
    body: web::Bytes,
    db: web::Data<Db>,
    session: web::ReqData<SessionData>,
) -> Result<HttpResponse> {
    let data: Value = serde_json::from_slice(&body).map_err(|_| PortalError::MalformedJson)?;
    let name = field(&data, "name")?;
    let subject = field(&data, "subject")?;
    let marks_value = data
        .get("marks")
        .filter(|v| !v.is_null())
        .ok_or(PortalError::MissingField("marks"))?;

    if !validate::clean_fields(&json!({ "name": name, "subject": subject })) {
        return Err(PortalError::InvalidInput);
    }
    let marks = registry::parse_marks(marks_value)?;

    let conn = db
        .lock()
        .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
    match registry::add(&conn, name, subject, marks)? {
        AddOutcome::Added(id) => log::info!(
            "Account {} added student {} ({} / {})",
            session.account_id,
            id,
            name,
            subject
        ),
        AddOutcome::Accumulated(id) => log::info!(
            "Account {} accumulated {} marks onto student {} ({} / {})",
            session.account_id,
            marks,
            id,
            name,
            subject
        ),
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Student added/updated successfully" })))
}

#[post("/student/{id}")]
pub async fn update_student(
    path: web::Path<i64>,
    body: web::Bytes,
    db: web::Data<Db>,
    session: web::ReqData<SessionData>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let data: Value = serde_json::from_slice(&body).map_err(|_| PortalError::MalformedJson)?;
    let name = field(&data, "name")?;
    let subject = field(&data, "subject")?;
    let marks_value = data
        .get("marks")
        .filter(|v| !v.is_null())
        .ok_or(PortalError::MissingField("marks"))?;

    if !validate::clean_fields(&json!({ "name": name, "subject": subject })) {
        return Err(PortalError::InvalidInput);
    }
    let marks = registry::parse_marks(marks_value)?;

    let conn = db
        .lock()
        .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
    registry::update(&conn, id, name, subject, marks)?;

    log::info!("Account {} updated student {}", session.account_id, id);

    Ok(HttpResponse::Ok().json(json!({ "message": "Student updated successfully" })))
}

#[post("/student/{id}/delete")]
pub async fn delete_student(
    path: web::Path<i64>,
    db: web::Data<Db>,
    session: web::ReqData<SessionData>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let conn = db
        .lock()
        .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
    registry::delete(&conn, id)?;

    log::info!("Account {} deleted student {}", session.account_id, id);

    Ok(HttpResponse::Ok().json(json!({ "message": "Student deleted successfully" })))
}
