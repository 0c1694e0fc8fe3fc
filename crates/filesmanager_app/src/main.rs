use std::sync::Arc;

use filesmanager_infrastructure::{
    database_connection::DatabaseClient, services::ServiceRegistry, settings::Settings,
};
use filesmanager_interface::errors::{AppError, Result};

mod logger;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().map_err(|e| AppError::ConfigError { msg: e.to_string() })?;

    logger::setup(&settings.logger.level);

    // Without a connection nothing can run, the error ends the process.
    let db = DatabaseClient::initialize(&settings.database).await?;

    let services = ServiceRegistry::new(Arc::new(db));

    report(&services).await
}

async fn report(services: &ServiceRegistry) -> Result<()> {
    let database = &services.database_service;

    tracing::info!(
        "Database '{}' alive: {}",
        services.database_client.database_name(),
        database.is_alive()
    );

    let stats = database.stats().await?;

    tracing::info!("Users: {}, files: {}", stats.users, stats.files);

    Ok(())
}
