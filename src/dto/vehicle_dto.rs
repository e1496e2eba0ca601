use axum::extract::Multipart;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::vehicle::DEFAULT_PAGE_SIZE;
use crate::models::{Page, SelectionGroup, VehicleFields, VehicleFilter, VehicleKind};
use crate::services::UploadedFile;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{filter_value, parse_number, split_features};

/// Nombre del campo multipart que transporta las imágenes
pub const IMAGES_FIELD: &str = "images";

// Parámetros de GET /api/vehicles
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "selectionType")]
    pub selection_type: Option<String>,
    pub marque: Option<String>,
    pub categorie: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl VehicleQuery {
    pub fn into_filter(self) -> AppResult<VehicleFilter> {
        let page = filter_value(self.page.as_deref())
            .map(|p| parse_number::<u32>(p, "page"))
            .transpose()?;
        let limit = filter_value(self.limit.as_deref())
            .map(|l| parse_number::<u32>(l, "limit"))
            .transpose()?;

        // Se pagina solo si el cliente pidió página o límite
        let page = match (page, limit) {
            (None, None) => None,
            (page, limit) => Some(Page::new(
                page.unwrap_or(1),
                limit.unwrap_or(DEFAULT_PAGE_SIZE),
            )?),
        };

        Ok(VehicleFilter {
            kind: filter_value(self.kind.as_deref())
                .map(str::parse::<VehicleKind>)
                .transpose()?,
            selection_group: filter_value(self.selection_type.as_deref())
                .map(str::parse::<SelectionGroup>)
                .transpose()?,
            brand: filter_value(self.marque.as_deref()).map(str::to_string),
            category: filter_value(self.categorie.as_deref()).map(str::to_string),
            page,
        })
    }
}

/// Formulario multipart de alta/modificación de vehículo
#[derive(Debug, Default)]
pub struct VehicleForm {
    pub fields: VehicleFields,
    pub images: Vec<UploadedFile>,
}

impl VehicleForm {
    /// Leer el cuerpo multipart completo. Más de `max_images` ficheros es un error de validación.
    pub async fn from_multipart(mut multipart: Multipart, max_images: usize) -> AppResult<Self> {
        let mut text_fields: Vec<(String, String)> = Vec::new();
        let mut images = Vec::new();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let original_name = field.file_name().map(str::to_string);

            if name == IMAGES_FIELD || name == "images[]" {
                let bytes = field.bytes().await?;
                // Un <input type=file> vacío envía una parte sin nombre ni contenido
                if bytes.is_empty() && original_name.as_deref().map_or(true, str::is_empty) {
                    continue;
                }
                if images.len() == max_images {
                    return Err(validation_error(format!(
                        "at most {} images can be uploaded at once",
                        max_images
                    )));
                }
                images.push(UploadedFile {
                    original_name,
                    bytes,
                });
            } else {
                let value = field.text().await?;
                text_fields.push((name, value));
            }
        }

        Ok(Self {
            fields: parse_vehicle_fields(&text_fields)?,
            images,
        })
    }
}

/// Convertir los campos de texto del formulario. Los valores vacíos cuentan como no enviados.
pub fn parse_vehicle_fields(pairs: &[(String, String)]) -> AppResult<VehicleFields> {
    let mut fields = VehicleFields::default();

    for (name, raw) in pairs {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        let text = || Some(value.to_string());

        match name.as_str() {
            "marque" => fields.brand = text(),
            "modele" => fields.model = text(),
            "prix" => fields.price = Some(parse_number::<Decimal>(value, "prix")?),
            "annee" => fields.year = Some(parse_number::<i32>(value, "annee")?),
            "kilometrage" => fields.mileage = Some(parse_number::<i64>(value, "kilometrage")?),
            "transmission" => fields.transmission = text(),
            "carburant" => fields.fuel_type = text(),
            "coteVolant" => fields.steering_side = text(),
            "categorie" => fields.category = text(),
            "commentaires" => fields.comments = text(),
            "features" | "features[]" => fields
                .features
                .get_or_insert_with(Vec::new)
                .extend(split_features(value)),
            "type" => fields.kind = Some(value.parse::<VehicleKind>()?),
            "selectionType" => fields.selection_group = Some(value.parse::<SelectionGroup>()?),
            _ => {}
        }
    }

    Ok(fields)
}

// Respuesta simple con mensaje
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
