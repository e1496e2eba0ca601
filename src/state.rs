//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    InMemoryStore, OrderRepository, OrderStore, StatsRepository, StatsStore, VehicleRepository,
    VehicleStore,
};
use crate::services::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub orders: Arc<dyn OrderStore>,
    pub stats: Arc<dyn StatsStore>,
    pub images: ImageStore,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            vehicles: Arc::new(VehicleRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            stats: Arc::new(StatsRepository::new(pool)),
            images: ImageStore::new(config.upload_dir.clone()),
            config,
        }
    }

    /// Estado en memoria: tests y desarrollo sin base de datos
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            vehicles: store.clone(),
            orders: store.clone(),
            stats: store,
            images: ImageStore::new(config.upload_dir.clone()),
            config,
        }
    }
}
