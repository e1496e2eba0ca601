//! Rutas HTTP
//!
//! Monta los routers de vehículos, pedidos y estadísticas sobre `/api`,
//! y sirve las imágenes subidas bajo `/uploads`.

pub mod order_routes;
pub mod stats_routes;
pub mod vehicle_routes;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::services::image_intake::PUBLIC_PREFIX;
use crate::state::AppState;

/// Crear el router principal de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        if state.config.is_production() {
            warn!("⚠️ CORS_ORIGINS vacío en producción: se acepta cualquier origen");
        }
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/commandes", order_routes::create_order_router())
        .nest("/api/stats", stats_routes::create_stats_router())
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.config.upload_dir.clone()))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
