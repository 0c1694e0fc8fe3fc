use std::sync::Arc;

use async_trait::async_trait;

use crate::database::model::DatabaseStats;
use crate::errors::Result;

#[async_trait]
pub trait DatabaseService {
    /// Whether the connection to the database has been established.
    fn is_alive(&self) -> bool;

    async fn count_users(&self) -> Result<u64>;
    async fn count_files(&self) -> Result<u64>;

    /// Both counts, queried concurrently. Fails with the first error returned.
    async fn stats(&self) -> Result<DatabaseStats> {
        let (users, files) = tokio::try_join!(self.count_users(), self.count_files())?;

        Ok(DatabaseStats { users, files })
    }
}

pub type DatabaseServiceHandle = Arc<dyn DatabaseService + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    struct FixedCounts {
        users: Result<u64>,
        files: Result<u64>,
    }

    #[async_trait]
    impl DatabaseService for FixedCounts {
        fn is_alive(&self) -> bool {
            true
        }

        async fn count_users(&self) -> Result<u64> {
            self.users.clone()
        }

        async fn count_files(&self) -> Result<u64> {
            self.files.clone()
        }
    }

    #[tokio::test]
    async fn stats_combines_both_counts() {
        let service: DatabaseServiceHandle = Arc::new(FixedCounts {
            users: Ok(3),
            files: Ok(12),
        });

        let stats = service.stats().await.unwrap();

        assert_eq!(stats, DatabaseStats { users: 3, files: 12 });
    }

    #[tokio::test]
    async fn stats_propagates_a_failed_count() {
        let service = FixedCounts {
            users: Ok(3),
            files: Err(AppError::QueryError {
                msg: "timed out".to_string(),
            }),
        };

        let err = service.stats().await.unwrap_err();

        assert!(matches!(err, AppError::QueryError { .. }));
    }
}
