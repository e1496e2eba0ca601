//! Catálogo y pedidos de vehículos
//!
//! Backend HTTP de la tienda pública y de la consola de administración:
//! listado filtrado de vehículos, fichas, pedidos y contadores del dashboard.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
