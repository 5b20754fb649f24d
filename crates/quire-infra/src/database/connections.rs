use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

#[cfg(feature = "postgres")]
use super::entity::post;

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Bounds both establishing a connection and acquiring one from the pool.
    pub connect_timeout: Duration,
}

/// Connection pool to the PostgreSQL database holding the `posts` table.
#[cfg(feature = "postgres")]
pub struct PostgresDatabase {
    conn: DbConn,
}

#[cfg(feature = "postgres")]
impl PostgresDatabase {
    /// Open the connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { conn })
    }

    /// Create the `posts` table from the entity definition if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(post::Entity);
        stmt.if_not_exists();

        self.conn.execute(backend.build(&stmt)).await?;
        tracing::debug!("posts table ready");
        Ok(())
    }

    pub fn conn(&self) -> &DbConn {
        &self.conn
    }
}
