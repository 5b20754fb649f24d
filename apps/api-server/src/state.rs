//! Application state - shared across all handlers.

use std::sync::Arc;

use quire_core::PostService;
use quire_core::ports::PostRepository;
use quire_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quire_infra::{PostgresDatabase, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which store backs `posts`, reported by the health endpoint.
    pub store: &'static str,
}

impl AppState {
    pub fn with_repository(repo: Arc<dyn PostRepository>, store: &'static str) -> Self {
        Self {
            posts: PostService::new(repo),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match connect_postgres(config).await {
                Ok(repo) => Self::with_repository(repo, "postgres"),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory()
        };

        tracing::info!(store = state.store, "Application state initialized");
        state
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
    let db = PostgresDatabase::connect(config).await?;
    db.ensure_schema().await?;
    Ok(Arc::new(PostgresPostRepository::new(db.conn().clone())))
}
