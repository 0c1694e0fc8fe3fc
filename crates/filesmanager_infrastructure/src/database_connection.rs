use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use filesmanager_interface::database::service::DatabaseService;
use filesmanager_interface::errors::{AppError, Result};

use crate::settings;

pub const USERS_COLLECTION: &str = "users";
pub const FILES_COLLECTION: &str = "files";

const APP_NAME: &str = "files_manager";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Ready,
    Failed,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Ready,
            2 => ConnectionState::Failed,
            _ => ConnectionState::Connecting,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Connecting => 0,
            ConnectionState::Ready => 1,
            ConnectionState::Failed => 2,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Ready => write!(f, "ready"),
            ConnectionState::Failed => write!(f, "failed"),
        }
    }
}

/// The single connection of the process to the files_manager database.
///
/// The driver connects lazily, so a client built with [`DatabaseClient::new`]
/// stays in the `Connecting` state until [`DatabaseClient::connect`] has
/// pinged the server. `Ready` and `Failed` are terminal.
pub struct DatabaseClient {
    database: Database,
    settings: settings::Database,
    state: AtomicU8,
}

impl DatabaseClient {
    /// Builds the client and opens the connection. The error is logged before being returned.
    pub async fn initialize(settings: &settings::Database) -> Result<Self> {
        let client = Self::new(settings).await?;
        client.connect().await?;

        Ok(client)
    }

    /// Parses the connection options without reaching the server.
    pub async fn new(settings: &settings::Database) -> Result<Self> {
        Self::build(settings, None).await
    }

    async fn build(
        settings: &settings::Database,
        server_selection_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(settings.to_string())
            .await
            .map_err(|e| connection_error(settings, e))?;

        options.app_name = Some(APP_NAME.to_string());
        if server_selection_timeout.is_some() {
            options.server_selection_timeout = server_selection_timeout;
        }

        let database = Client::with_options(options)
            .map_err(|e| connection_error(settings, e))?
            .database(&settings.name);

        Ok(Self {
            database,
            settings: settings.clone(),
            state: AtomicU8::new(ConnectionState::Connecting.as_u8()),
        })
    }

    pub async fn connect(&self) -> Result<()> {
        match self.state() {
            ConnectionState::Ready => return Ok(()),
            ConnectionState::Failed => {
                return Err(AppError::ConnectionError {
                    msg: format!("connection to {} previously failed", self.settings),
                })
            }
            ConnectionState::Connecting => {}
        }

        match self.database.run_command(doc! {"ping": 1}, None).await {
            Ok(_) => {
                self.state
                    .store(ConnectionState::Ready.as_u8(), Ordering::Release);
                tracing::info!("Connected to MongoDB at {}", self.settings);
                Ok(())
            }
            Err(e) => {
                self.state
                    .store(ConnectionState::Failed.as_u8(), Ordering::Release);
                Err(connection_error(&self.settings, e))
            }
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the initial connection succeeded.
    ///
    /// This is a readiness flag, not a live health check: it stays true if the
    /// server goes away after the first successful ping.
    pub fn is_alive(&self) -> bool {
        self.state() == ConnectionState::Ready
    }

    pub fn database_name(&self) -> &str {
        &self.settings.name
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.count(USERS_COLLECTION).await
    }

    pub async fn count_files(&self) -> Result<u64> {
        self.count(FILES_COLLECTION).await
    }

    pub async fn users_collection(&self) -> Result<Collection<Document>> {
        self.collection(USERS_COLLECTION)
    }

    pub async fn files_collection(&self) -> Result<Collection<Document>> {
        self.collection(FILES_COLLECTION)
    }

    async fn count(&self, name: &str) -> Result<u64> {
        self.collection(name)?
            .count_documents(doc! {}, None)
            .await
            .map_err(|e| AppError::QueryError { msg: e.to_string() })
    }

    fn collection(&self, name: &str) -> Result<Collection<Document>> {
        match self.state() {
            ConnectionState::Ready => Ok(self.database.collection::<Document>(name)),
            state => Err(AppError::NotReadyError {
                msg: format!("the connection to {} is {}", self.settings, state),
            }),
        }
    }
}

fn connection_error(settings: &settings::Database, e: mongodb::error::Error) -> AppError {
    tracing::error!("Failed to connect to MongoDB at {}: {}", settings, e);

    AppError::ConnectionError { msg: e.to_string() }
}

#[async_trait]
impl DatabaseService for DatabaseClient {
    fn is_alive(&self) -> bool {
        DatabaseClient::is_alive(self)
    }

    async fn count_users(&self) -> Result<u64> {
        DatabaseClient::count_users(self).await
    }

    async fn count_files(&self) -> Result<u64> {
        DatabaseClient::count_files(self).await
    }
}
