//! Utilidades de validación
//!
//! Funciones helper para validación de datos de entrada
//! y conversión de tipos.

use chrono::NaiveDate;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{validation_error, AppResult};

/// Valores que la tienda envía para decir "sin filtro"
const UNSET_SENTINELS: [&str; 2] = ["all", "toutes"];

/// Validar y convertir string a UUID
pub fn parse_id(value: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| validation_error(format!("'{}' is not a valid {} id", value, resource)))
}

/// Validar y convertir string a fecha (YYYY-MM-DD, o RFC3339 truncado a la fecha)
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive())
        })
        .map_err(|_| validation_error(format!("{} must be a date formatted YYYY-MM-DD", field)))
}

/// Parsear un número desde un campo de formulario
pub fn parse_number<T: FromStr>(value: &str, field: &str) -> AppResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| validation_error(format!("{} must be a number, got '{}'", field, value)))
}

/// Normalizar un valor de filtro: `None` si está ausente, vacío o es un centinela
pub fn filter_value(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() || UNSET_SENTINELS.iter().any(|s| value.eq_ignore_ascii_case(s)) {
        None
    } else {
        Some(value)
    }
}

/// Separar una lista de etiquetas delimitada por comas
pub fn split_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
