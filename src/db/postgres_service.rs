use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        Self::connect(ConnectOptions::new(uri.to_owned())).await
    }

    /// Tests pass their own options here (single-connection in-memory sqlite).
    pub async fn connect(options: ConnectOptions) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Migrations finished.");
        Ok(Self {
            database_connection,
        })
    }

    /// Raw handle to the backing store, for callers that outgrow the managers.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
