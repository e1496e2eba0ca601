//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del catálogo, su clasificación
//! (stock o selección) y los filtros y cambios aplicables en CRUD.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Tamaño de página por defecto del listado público
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Tamaño de página máximo aceptado
pub const MAX_PAGE_SIZE: u32 = 100;
/// Decimales admitidos en `prix` (columna NUMERIC(14, 2))
pub const PRICE_SCALE: u32 = 2;
/// Cota superior exclusiva de `prix`: 10^12
pub const PRICE_LIMIT: i64 = 1_000_000_000_000;

/// Tipo de vehículo: stock general o selección destacada
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Stock,
    Selection,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Stock => "stock",
            VehicleKind::Selection => "selection",
        }
    }
}

impl FromStr for VehicleKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(VehicleKind::Stock),
            "selection" => Ok(VehicleKind::Selection),
            other => Err(validation_error(format!(
                "type must be 'stock' or 'selection', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grupo de una selección: nuevos, rebajas o destacados
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SelectionGroup {
    #[serde(rename = "nouveaux", alias = "new")]
    New,
    #[serde(rename = "soldes", alias = "discounted")]
    Discounted,
    #[serde(rename = "vedettes", alias = "featured")]
    Featured,
}

impl SelectionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionGroup::New => "nouveaux",
            SelectionGroup::Discounted => "soldes",
            SelectionGroup::Featured => "vedettes",
        }
    }
}

impl FromStr for SelectionGroup {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nouveaux" | "new" => Ok(SelectionGroup::New),
            "soldes" | "discounted" => Ok(SelectionGroup::Discounted),
            "vedettes" | "featured" => Ok(SelectionGroup::Featured),
            other => Err(validation_error(format!(
                "selectionType must be one of nouveaux, soldes, vedettes; got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SelectionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clasificación del vehículo. El grupo existe si y solo si es una selección.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Classification {
    Stock,
    Selection {
        #[serde(rename = "selectionType")]
        group: SelectionGroup,
    },
}

impl Classification {
    pub fn kind(&self) -> VehicleKind {
        match self {
            Classification::Stock => VehicleKind::Stock,
            Classification::Selection { .. } => VehicleKind::Selection,
        }
    }

    pub fn group(&self) -> Option<SelectionGroup> {
        match self {
            Classification::Stock => None,
            Classification::Selection { group } => Some(*group),
        }
    }

    /// Construir desde las columnas sueltas. Un grupo enviado con `stock` se descarta.
    pub fn from_parts(kind: VehicleKind, group: Option<SelectionGroup>) -> AppResult<Self> {
        match (kind, group) {
            (VehicleKind::Stock, _) => Ok(Classification::Stock),
            (VehicleKind::Selection, Some(group)) => Ok(Classification::Selection { group }),
            (VehicleKind::Selection, None) => Err(validation_error(
                "selectionType is required when type is 'selection'",
            )),
        }
    }
}

/// Vehicle del catálogo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "marque")]
    pub brand: String,
    #[serde(rename = "modele")]
    pub model: String,
    #[serde(rename = "prix")]
    pub price: Decimal,
    #[serde(rename = "annee")]
    pub year: Option<i32>,
    #[serde(rename = "kilometrage")]
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    #[serde(rename = "carburant")]
    pub fuel_type: Option<String>,
    #[serde(rename = "coteVolant")]
    pub steering_side: Option<String>,
    #[serde(rename = "categorie")]
    pub category: Option<String>,
    #[serde(rename = "commentaires")]
    pub comments: Option<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub classification: Classification,
    #[serde(rename = "dateCreation")]
    pub created_at: DateTime<Utc>,
}

/// Campos suministrados en un alta o una modificación.
/// `None` significa "no enviado".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFields {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<Decimal>,
    pub year: Option<i32>,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub steering_side: Option<String>,
    pub category: Option<String>,
    pub comments: Option<String>,
    pub features: Option<Vec<String>>,
    pub kind: Option<VehicleKind>,
    pub selection_group: Option<SelectionGroup>,
}

impl VehicleFields {
    fn check(&self) -> AppResult<()> {
        if let Some(price) = self.price {
            if price < Decimal::ZERO {
                return Err(validation_error("prix must not be negative"));
            }
            if price >= Decimal::from(PRICE_LIMIT) {
                return Err(validation_error(format!("prix must be below {}", PRICE_LIMIT)));
            }
            if price.normalize().scale() > PRICE_SCALE {
                return Err(validation_error(format!(
                    "prix accepts at most {} decimal places",
                    PRICE_SCALE
                )));
            }
        }
        if let Some(mileage) = self.mileage {
            if mileage < 0 {
                return Err(validation_error("kilometrage must not be negative"));
            }
        }
        for (field, value) in [("marque", &self.brand), ("modele", &self.model)] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(validation_error(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

impl Vehicle {
    /// Crear un vehículo nuevo a partir de los campos del formulario
    pub fn create(fields: VehicleFields, images: Vec<String>) -> AppResult<Self> {
        fields.check()?;

        let brand = fields
            .brand
            .ok_or_else(|| validation_error("marque is required"))?;
        let model = fields
            .model
            .ok_or_else(|| validation_error("modele is required"))?;
        let price = fields
            .price
            .ok_or_else(|| validation_error("prix is required"))?;
        let classification = Classification::from_parts(
            fields.kind.unwrap_or(VehicleKind::Stock),
            fields.selection_group,
        )?;

        Ok(Self {
            id: Uuid::new_v4(),
            brand,
            model,
            price,
            year: fields.year,
            mileage: fields.mileage,
            transmission: fields.transmission,
            fuel_type: fields.fuel_type,
            steering_side: fields.steering_side,
            category: fields.category,
            comments: fields.comments,
            features: fields.features.unwrap_or_default(),
            images,
            classification,
            // Precisión de TIMESTAMPTZ
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    /// Fusionar cambios. Una lista de imágenes no vacía reemplaza la anterior por completo.
    pub fn apply(&mut self, fields: VehicleFields, images: Option<Vec<String>>) -> AppResult<()> {
        fields.check()?;

        // La clasificación se resuelve antes de tocar nada para no dejar el registro a medias
        let classification = match (fields.kind, fields.selection_group) {
            (None, None) => self.classification,
            (kind, group) => Classification::from_parts(
                kind.unwrap_or(self.classification.kind()),
                group.or(self.classification.group()),
            )?,
        };

        if let Some(brand) = fields.brand {
            self.brand = brand;
        }
        if let Some(model) = fields.model {
            self.model = model;
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        self.year = fields.year.or(self.year);
        self.mileage = fields.mileage.or(self.mileage);
        merge_text(&mut self.transmission, fields.transmission);
        merge_text(&mut self.fuel_type, fields.fuel_type);
        merge_text(&mut self.steering_side, fields.steering_side);
        merge_text(&mut self.category, fields.category);
        merge_text(&mut self.comments, fields.comments);
        if let Some(features) = fields.features {
            self.features = features;
        }
        if let Some(images) = images {
            self.replace_images(images);
        }
        self.classification = classification;

        Ok(())
    }

    /// Reemplazo completo, nunca fusión. Una lista vacía no cambia nada.
    pub fn replace_images(&mut self, images: Vec<String>) {
        if !images.is_empty() {
            self.images = images;
        }
    }

    /// Imagen principal: la primera de la lista
    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn matches(&self, filter: &VehicleFilter) -> bool {
        filter.kind.map_or(true, |kind| self.classification.kind() == kind)
            && filter
                .selection_group
                .map_or(true, |group| self.classification.group() == Some(group))
            && filter.brand.as_deref().map_or(true, |brand| self.brand == brand)
            && filter
                .category
                .as_deref()
                .map_or(true, |category| self.category.as_deref() == Some(category))
    }
}

fn merge_text(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

/// Página solicitada (1-indexada)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn new(number: u32, size: u32) -> AppResult<Self> {
        if number < 1 {
            return Err(validation_error("page must be 1 or greater"));
        }
        if size < 1 || size > MAX_PAGE_SIZE {
            return Err(validation_error(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self { number, size })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// Filtros para búsqueda de vehículos. `None` no restringe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub kind: Option<VehicleKind>,
    pub selection_group: Option<SelectionGroup>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub page: Option<Page>,
}
