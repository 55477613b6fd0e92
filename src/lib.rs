// Library exports for testing and reuse

pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod registry;
pub mod session;
pub mod validate;

use actix_web::{middleware as actix_middleware, web};

/// Route table shared by the server binary and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes (no authentication required)
        .service(handlers::health_check)
        .service(handlers::register)
        .service(handlers::login)
        .service(handlers::logout)
        .service(handlers::list_students)
        // Protected routes (authentication required)
        .service(
            web::scope("")
                .wrap(actix_middleware::from_fn(middleware::auth_middleware))
                .service(handlers::add_student)
                .service(handlers::update_student)
                .service(handlers::delete_student),
        );
}
