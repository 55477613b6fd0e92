use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Invalid JSON")]
    MalformedJson,

    #[error("Invalid input: use only letters, numbers, and spaces")]
    InvalidInput,

    #[error("Marks must be an integer between 0 and 100")]
    InvalidMarks,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Student not found")]
    NotFound,

    #[error("A student with that name and subject already exists")]
    DuplicateStudent,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::MalformedJson
            | PortalError::InvalidInput
            | PortalError::InvalidMarks
            | PortalError::MissingField(_)
            | PortalError::DuplicateUsername
            | PortalError::PasswordMismatch => StatusCode::BAD_REQUEST,
            PortalError::InvalidCredentials | PortalError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            PortalError::NotFound => StatusCode::NOT_FOUND,
            PortalError::DuplicateStudent => StatusCode::CONFLICT,
            PortalError::Database(_)
            | PortalError::PasswordHash(_)
            | PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
