//! Configuración de conexión a PostgreSQL
//!
//! Este módulo crea el pool de conexiones y asegura que el esquema exista.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use super::schema::SCHEMA_STATEMENTS;
use crate::config::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("could not connect to PostgreSQL")?;

    info!("✅ PostgreSQL conectado exitosamente");
    Ok(pool)
}

/// Crear tablas e índices si no existen
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for &statement in SCHEMA_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("schema statement failed: {}", statement.trim()))?;
    }

    info!("📐 Esquema verificado ({} sentencias)", SCHEMA_STATEMENTS.len());
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
