pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::DatabaseConfig;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

/// Build the store selected by `DATABASE_URL`
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    if config.uses_memory_store() {
        info!("Using in-memory store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = DatabaseManager::connect(config).await?;
    Ok(Arc::new(PgStore::new(pool)))
}
