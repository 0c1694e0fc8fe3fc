use std::sync::Arc;

use filesmanager_interface::database::service::DatabaseServiceHandle;

use crate::database_connection::DatabaseClient;

// Every component needing the database gets it from here, all sharing one connection.
#[derive(Clone)]
pub struct ServiceRegistry {
    pub database_client: Arc<DatabaseClient>,
    pub database_service: DatabaseServiceHandle,
}

impl ServiceRegistry {
    pub fn new(database_client: Arc<DatabaseClient>) -> Self {
        let database_service: DatabaseServiceHandle = database_client.clone();

        Self {
            database_client,
            database_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings;
    use filesmanager_interface::errors::AppError;

    async fn registry() -> ServiceRegistry {
        let client = DatabaseClient::new(&settings::Database {
            host: "localhost".to_string(),
            port: 27017,
            name: "files_manager".to_string(),
        })
        .await
        .unwrap();

        ServiceRegistry::new(Arc::new(client))
    }

    #[tokio::test]
    async fn both_views_share_one_client() {
        let services = registry().await;

        let client_ptr = Arc::as_ptr(&services.database_client) as *const u8;
        let service_ptr = Arc::as_ptr(&services.database_service) as *const u8;

        assert_eq!(client_ptr, service_ptr);
        assert_eq!(Arc::strong_count(&services.database_client), 2);
    }

    #[tokio::test]
    async fn service_handle_reports_not_ready() {
        let services = registry().await;

        assert!(!services.database_service.is_alive());
        assert!(matches!(
            services.database_service.stats().await,
            Err(AppError::NotReadyError { .. })
        ));
    }
}
