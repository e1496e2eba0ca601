use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vehicle_catalog::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_catalog::database;
use vehicle_catalog::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Catálogo de vehículos - tienda y administración");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;

    let app_state = match config.database_url.clone() {
        Some(url) => {
            let pool = match database::create_pool(&DatabaseConfig::new(url)).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            database::run_migrations(&pool).await?;
            AppState::with_postgres(pool, config.clone())
        }
        None => {
            if config.is_production() {
                error!("❌ DATABASE_URL no definida en producción: los datos no persistirán");
            } else {
                warn!("⚠️ DATABASE_URL no definida: usando almacén en memoria (los datos no persisten)");
            }
            AppState::in_memory(config.clone())
        }
    };

    app_state.images.ensure_dir().await?;
    info!("📁 Directorio de imágenes: {}", app_state.images.root().display());

    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /api/vehicles - Listar vehículos (type, selectionType, marque, categorie, page, limit)");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   POST   /api/vehicles - Crear vehículo (multipart, hasta {} imágenes)", config.max_images);
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo (multipart)");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   POST   /api/commandes - Crear pedido");
    info!("   GET    /api/commandes - Listar pedidos");
    info!("   PUT    /api/commandes/:id - Cambiar estado de pedido");
    info!("   GET    /api/stats - Contadores del dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
