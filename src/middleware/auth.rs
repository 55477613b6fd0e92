use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage,
};

use crate::error::PortalError;
use crate::session::SessionManager;

pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    // Extract session_id from cookie
    let session_id = req
        .cookie("session_id")
        .map(|c| c.value().to_string())
        .ok_or(PortalError::Unauthorized)?;

    // Get SessionManager from app data
    let session_manager = req
        .app_data::<web::Data<SessionManager>>()
        .ok_or_else(|| PortalError::Internal("session manager not available".to_string()))?;

    // Validate session
    let session = session_manager
        .validate_session(&session_id)
        .ok_or(PortalError::Unauthorized)?;

    // Store the session in request extensions for handlers to use
    req.extensions_mut().insert(session);

    next.call(req).await
}
