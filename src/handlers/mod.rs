pub mod auth;
pub mod health;
pub mod students;

pub use auth::{login, logout, register};
pub use health::health_check;
pub use students::{add_student, delete_student, list_students, update_student};

use serde_json::Value;

use crate::error::{PortalError, Result};

pub(crate) fn field<'a>(data: &'a Value, name: &'static str) -> Result<&'a str> {
    data.get(name)
        .and_then(Value::as_str)
        .ok_or(PortalError::MissingField(name))
}
