//! Registrant persistence.
//!
//! [`RegistrantStore`] is the single capability the rest of the service
//! depends on. Implementations are interchangeable: in memory, a local
//! JSON file, a remote REST API, or PostgreSQL.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use signup_core::registrant::Registrant;
use sqlx::postgres::PgPoolOptions;

pub mod file;
pub mod memory;
pub mod postgres;
pub mod remote;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use remote::RemoteStore;

pub type DbPool = sqlx::PgPool;

/// Errors from any store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed registrant data: {0}")]
    Serde(#[from] serde_json::Error),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote API answered with a non-2xx status.
    #[error("Remote API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Ordered collection of registrants.
#[async_trait]
pub trait RegistrantStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Every registrant, in insertion order.
    async fn list(&self) -> Result<Vec<Registrant>, StoreError>;

    /// Append a registrant and return the stored record.
    async fn add(&self, registrant: Registrant) -> Result<Registrant, StoreError>;

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list().await?.len())
    }

    /// Remove every registrant.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Which store to open at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File { path: PathBuf },
    Remote { base_url: String },
    Postgres { database_url: String },
}

/// Open the configured store, running migrations for PostgreSQL.
pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn RegistrantStore>, StoreError> {
    let store: Arc<dyn RegistrantStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File { path } => Arc::new(JsonFileStore::new(path.clone())),
        StoreBackend::Remote { base_url } => Arc::new(RemoteStore::new(base_url)?),
        StoreBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            health_check(&pool).await?;
            run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
    };
    tracing::info!(backend = store.backend(), "Registrant store opened");
    Ok(store)
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
