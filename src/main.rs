use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use std::time::Duration;
use tokio::time;

use portald::config::Config;
use portald::db;
use portald::session::SessionManager;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting student portal server...");

    let config = Config::load();

    let conn = db::open_db(&config.database_path).unwrap_or_else(|e| {
        eprintln!(
            "Failed to open database under '{}': {}",
            config.database_path.display(),
            e
        );
        std::process::exit(1);
    });
    log::info!("Database ready at {}", config.database_path.display());

    // Create shared state
    let db_handle = web::Data::new(db::Db::new(conn));
    let session_manager = SessionManager::new(config.session_expiry_hours);
    log::info!(
        "Session expiry set to {} hours",
        config.session_expiry_hours
    );

    // Spawn background cleanup task
    let session_manager_clone = session_manager.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = session_manager_clone.cleanup_expired();
            if removed > 0 {
                log::info!("Background cleanup: removed {} expired sessions", removed);
            }
        }
    });

    log::info!(
        "Starting HTTP server at {}:{}...",
        config.host,
        config.port
    );

    let bind_addr = (config.host.clone(), config.port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(db_handle.clone())
            .app_data(web::Data::new(session_manager.clone()))
            // Middleware
            .wrap(actix_middleware::Logger::default())
            .configure(portald::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
