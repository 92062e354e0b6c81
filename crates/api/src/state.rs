use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cardfolio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the hosted extraction endpoint.
    pub vision: cardfolio_vision::VisionClient,
    /// Object storage for card images.
    pub storage: cardfolio_storage::DynStorageProvider,
}
