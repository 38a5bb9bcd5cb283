use std::sync::Arc;

use actix_web::{middleware::Logger, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};

use um_api::app::{build_services, create_app};
use um_api::config::Config;
use um_infra::{InMemoryAccountDirectory, LoggingEmailDispatcher};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env();

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.app.logging.level.as_str()),
    );

    info!("Starting user management API ({})", config.environment());
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let services = build_services(
        config.auth(),
        Arc::new(InMemoryAccountDirectory::new()),
        Arc::new(LoggingEmailDispatcher::new()),
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let bind_address = config.server().bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(services.clone()).wrap(Logger::default()));
    if config.server().workers > 0 {
        server = server.workers(config.server().workers);
    }

    server.bind(&bind_address)?.run().await
}
