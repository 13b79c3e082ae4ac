use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DbConfig;

#[derive(Clone)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DbService {
    /// Connects and brings the schema up to date.
    pub async fn new(config: &DbConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options.connect_timeout(Duration::from_secs(10));
        if let Some(max) = config.max_connections {
            options.max_connections(max);
        }

        info!("Connecting to database...");
        let db = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&db, None).await?;
        info!("Database ready.");
        Ok(Self { database_connection: db })
    }

    /// Convenience for single-connection setups such as `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        Self::new(&DbConfig { url: url.to_string(), max_connections: Some(1) }).await
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
