use actix_web::{
    cookie::{Cookie, SameSite},
    get,
    http::header,
    post, web, HttpRequest, HttpResponse,
};
use serde_json::{json, Value};

use super::field;
use crate::accounts;
use crate::db::Db;
use crate::error::{PortalError, Result};
use crate::session::SessionManager;
use crate::validate;

#[post("/register")]
pub async fn register(body: web::Bytes, db: web::Data<Db>) -> Result<HttpResponse> {
    let data: Value = serde_json::from_slice(&body).map_err(|_| PortalError::MalformedJson)?;
    let username = field(&data, "username")?;
    let password = field(&data, "password")?;
    let confirm_password = field(&data, "confirm_password")?;

    if !validate::clean_fields(&json!({ "username": username, "password": password })) {
        return Err(PortalError::InvalidInput);
    }
    if username.len() > accounts::MAX_USERNAME_LEN {
        return Err(PortalError::InvalidInput);
    }
    if password != confirm_password {
        return Err(PortalError::PasswordMismatch);
    }

    let conn = db
        .lock()
        .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
    let account_id = accounts::create(&conn, username, password)?;

    log::info!("Registered teacher {} (account {})", username, account_id);

    Ok(HttpResponse::Created().json(json!({ "message": "Registration successful" })))
}

#[post("/login")]
pub async fn login(
    body: web::Bytes,
    db: web::Data<Db>,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse> {
    let data: Value = serde_json::from_slice(&body).map_err(|_| PortalError::MalformedJson)?;
    let username = field(&data, "username")?;
    let password = field(&data, "password")?;

    if !validate::clean_fields(&json!({ "username": username, "password": password })) {
        return Err(PortalError::InvalidInput);
    }

    let account_id = {
        let conn = db
            .lock()
            .map_err(|_| PortalError::Internal("database lock poisoned".to_string()))?;
        accounts::verify(&conn, username, password)?
    };
    let Some(account_id) = account_id else {
        log::warn!("Failed login attempt for user: {}", username);
        return Err(PortalError::InvalidCredentials);
    };

    let session = session_manager.create_session(account_id);

    log::info!(
        "Successful login for user: {} (session: {})",
        username,
        session.session_id
    );

    // Create session cookie
    let cookie = Cookie::build("session_id", session.session_id.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(actix_web::cookie::time::Duration::hours(
            session_manager.expiry_hours() as i64,
        ))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Login successful" })))
}

#[get("/logout")]
pub async fn logout(
    req: HttpRequest,
    session_manager: web::Data<SessionManager>,
) -> HttpResponse {
    if let Some(cookie) = req.cookie("session_id") {
        session_manager.invalidate_session(cookie.value());
    }

    let cleared = Cookie::build("session_id", "")
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(0))
        .finish();

    HttpResponse::Found()
        .cookie(cleared)
        .insert_header((header::LOCATION, "/login"))
        .finish()
}
